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

/// A predicate applied to an ordered list of terms, e.g. `(lookslike ?x TonyStark)`.
///
/// Equality is purely structural: `(p ?x)` and `(p ?y)` are different
/// statements even though they unify.
#[derive(PartialEq, Debug, Clone, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub predicate: String,
    pub terms: Vec<Term>,
}

impl Statement {
    pub fn new(predicate: &str, terms: Vec<Term>) -> Self {
        Statement {
            predicate: predicate.to_string(),
            terms,
        }
    }

    /// Builds a statement from whitespace-free tokens, treating `?`-prefixed
    /// tokens as variables.
    pub fn from_tokens(predicate: &str, tokens: &[&str]) -> Self {
        let terms = tokens
            .iter()
            .map(|token| {
                if token.starts_with('?') {
                    Term::var(token)
                } else {
                    Term::constant(token)
                }
            })
            .collect();
        Statement::new(predicate, terms)
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    pub fn is_ground(&self) -> bool {
        !self.terms.iter().any(Term::is_var)
    }

    /// Variable names in order of first occurrence.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for term in &self.terms {
            if let Term::Variable(name) = term {
                if !seen.contains(&name.as_str()) {
                    seen.push(name);
                }
            }
        }
        seen
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.predicate)?;
        for term in &self.terms {
            write!(f, " {term}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_ground() {
        let s = Statement::from_tokens("lookslike", &["?x", "TonyStark"]);
        assert_eq!(s.to_string(), "(lookslike ?x TonyStark)");
        assert!(!s.is_ground());
        assert_eq!(s.variables(), vec!["x"]);

        let g = Statement::from_tokens("techgenius", &["profHammond"]);
        assert!(g.is_ground());
        assert_eq!(g.arity(), 1);
    }

    #[test]
    fn test_structural_equality_does_not_unify() {
        let a = Statement::from_tokens("p", &["?x"]);
        let b = Statement::from_tokens("p", &["?y"]);
        assert_ne!(a, b);
        assert_eq!(a, Statement::from_tokens("p", &["?x"]));
    }

    #[test]
    fn test_serde_shape() {
        let s = Statement::from_tokens("smart", &["profHammond"]);
        let json = serde_json::to_string(&s).unwrap();
        let back: Statement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
