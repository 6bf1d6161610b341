/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::terms::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variable assignments produced by one successful match.
///
/// Kept as an ordered list so that printing follows the order in which the
/// variables were bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    entries: Vec<(String, Term)>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings {
            entries: Vec::new(),
        }
    }

    pub fn bound_to(&self, variable: &str) -> Option<&Term> {
        let variable = variable.trim_start_matches('?');
        self.entries
            .iter()
            .find(|(name, _)| name == variable)
            .map(|(_, term)| term)
    }

    /// Binds `variable` to `value` if it is still free, otherwise checks that
    /// the existing binding agrees. Returns `false` on a conflicting binding.
    pub fn test_and_bind(&mut self, variable: &str, value: &Term) -> bool {
        match self.bound_to(variable) {
            Some(bound) => bound == value,
            None => {
                self.entries.push((variable.to_string(), value.clone()));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.entries.iter().map(|(name, term)| (name.as_str(), term))
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, term)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "?{name} : {term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_bind_is_consistent() {
        let mut b = Bindings::new();
        assert!(b.test_and_bind("x", &Term::constant("a")));
        assert!(b.test_and_bind("x", &Term::constant("a")));
        assert!(!b.test_and_bind("x", &Term::constant("b")));
        assert_eq!(b.len(), 1);
        assert_eq!(b.bound_to("?x"), Some(&Term::constant("a")));
    }

    #[test]
    fn test_display() {
        let mut b = Bindings::new();
        b.test_and_bind("X", &Term::constant("profHammond"));
        b.test_and_bind("Y", &Term::constant("TonyStark"));
        assert_eq!(b.to_string(), "?X : profHammond, ?Y : TonyStark");
    }
}
