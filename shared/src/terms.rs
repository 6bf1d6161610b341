/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single argument of a [`crate::statement::Statement`].
///
/// Variable names are kept without the leading `?`; it is added back when
/// the term is displayed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    Constant(String),
}

impl Term {
    pub fn var(name: &str) -> Self {
        Term::Variable(name.trim_start_matches('?').to_string())
    }

    pub fn constant(name: &str) -> Self {
        Term::Constant(name.to_string())
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Raw name of the term, without the variable sigil.
    pub fn name(&self) -> &str {
        match self {
            Term::Variable(name) | Term::Constant(name) => name,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "?{name}"),
            Term::Constant(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_display_adds_sigil() {
        assert_eq!(Term::var("?X").to_string(), "?X");
        assert_eq!(Term::var("X"), Term::Variable("X".to_string()));
        assert_eq!(Term::constant("profHammond").to_string(), "profHammond");
    }

    #[test]
    fn test_is_var() {
        assert!(Term::var("x").is_var());
        assert!(!Term::constant("x").is_var());
        assert_ne!(Term::var("x"), Term::constant("x"));
    }
}
