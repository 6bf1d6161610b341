/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use shared::bindings::Bindings;
use shared::rule::Sentence;
use shared::statement::Statement;
use shared::terms::Term;

/// Matches two statements position by position.
///
/// A variable on the left is bound to whatever sits on the right, even
/// another variable. Otherwise a variable on the right is bound to the left
/// constant. Two constants must be identical. Returns `None` when the
/// predicates or arities differ or a binding conflicts.
pub fn match_statements(left: &Statement, right: &Statement) -> Option<Bindings> {
    if left.predicate != right.predicate || left.arity() != right.arity() {
        return None;
    }

    let mut bindings = Bindings::new();
    for (l, r) in left.terms.iter().zip(&right.terms) {
        let consistent = match (l, r) {
            (Term::Variable(name), other) => bindings.test_and_bind(name, other),
            (constant, Term::Variable(name)) => bindings.test_and_bind(name, constant),
            (Term::Constant(a), Term::Constant(b)) => a == b,
        };
        if !consistent {
            return None;
        }
    }
    Some(bindings)
}

/// Replaces every bound variable of `statement`; unbound variables are kept.
pub fn instantiate(statement: &Statement, bindings: &Bindings) -> Statement {
    let terms = statement
        .terms
        .iter()
        .map(|term| match term {
            Term::Variable(name) => {
                bindings.bound_to(name).cloned().unwrap_or_else(|| term.clone())
            }
            Term::Constant(_) => term.clone(),
        })
        .collect();
    Statement {
        predicate: statement.predicate.clone(),
        terms,
    }
}

/// A predicate must be a non-empty constant symbol and every term must have a name.
pub fn well_formed(statement: &Statement) -> bool {
    let symbol_ok = |s: &str| {
        !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '(' || c == ')')
    };
    symbol_ok(statement.predicate.as_str())
        && !statement.predicate.starts_with('?')
        && statement.terms.iter().all(|t| symbol_ok(t.name()))
}

/// True iff `sentence` can be used as a query: a fact with a well-formed statement.
pub fn factq(sentence: &Sentence) -> bool {
    matches!(sentence, Sentence::Fact(statement) if well_formed(statement))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(pred: &str, tokens: &[&str]) -> Statement {
        Statement::from_tokens(pred, tokens)
    }

    #[test]
    fn test_match_binds_pattern_variables() {
        let fact = st("lookslike", &["profHammond", "TonyStark"]);
        let pattern = st("lookslike", &["?x", "?y"]);
        let b = match_statements(&fact, &pattern).unwrap();
        assert_eq!(b.bound_to("x"), Some(&Term::constant("profHammond")));
        assert_eq!(b.bound_to("y"), Some(&Term::constant("TonyStark")));
    }

    #[test]
    fn test_match_rejects_predicate_or_arity_mismatch() {
        assert!(match_statements(&st("p", &["a"]), &st("q", &["a"])).is_none());
        assert!(match_statements(&st("p", &["a"]), &st("p", &["a", "b"])).is_none());
        assert!(match_statements(&st("p", &["a"]), &st("p", &["b"])).is_none());
    }

    #[test]
    fn test_repeated_variable_must_agree() {
        let pattern = st("same", &["?x", "?x"]);
        assert!(match_statements(&st("same", &["a", "a"]), &pattern).is_some());
        assert!(match_statements(&st("same", &["a", "b"]), &pattern).is_none());
    }

    #[test]
    fn test_ground_match_gives_empty_bindings() {
        let b = match_statements(&st("p", &["a"]), &st("p", &["a"])).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn test_instantiate_keeps_unbound_variables() {
        let mut b = Bindings::new();
        b.test_and_bind("x", &Term::constant("a"));
        let out = instantiate(&st("r", &["?x", "?z", "c"]), &b);
        assert_eq!(out, st("r", &["a", "?z", "c"]));
    }

    #[test]
    fn test_factq() {
        assert!(factq(&Sentence::fact(st("p", &["a"]))));
        assert!(factq(&Sentence::fact(st("p", &["?x"]))));
        assert!(!factq(&Sentence::fact(st("?p", &["a"]))));
        assert!(!factq(&Sentence::fact(st("", &[]))));
        assert!(!factq(&Sentence::rule(vec![st("p", &["?x"])], st("q", &["?x"]))));
    }
}
