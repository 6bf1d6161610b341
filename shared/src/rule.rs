/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */
use crate::statement::Statement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural content of a rule: a conjunction of antecedents implying one consequent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Implication {
    pub lhs: Vec<Statement>,
    pub rhs: Statement,
}

impl Implication {
    pub fn new(lhs: Vec<Statement>, rhs: Statement) -> Self {
        Implication { lhs, rhs }
    }

    /// Consequent variables that no antecedent mentions.
    pub fn unbound_variables(&self) -> Vec<&str> {
        self.rhs
            .variables()
            .into_iter()
            .filter(|v| !self.lhs.iter().any(|s| s.variables().contains(v)))
            .collect()
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, statement) in self.lhs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        write!(f, ") -> {}", self.rhs)
    }
}

/// One input line as the reader hands it to the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentence {
    Fact(Statement),
    Rule(Implication),
}

impl Sentence {
    pub fn fact(statement: Statement) -> Self {
        Sentence::Fact(statement)
    }

    pub fn rule(lhs: Vec<Statement>, rhs: Statement) -> Self {
        Sentence::Rule(Implication::new(lhs, rhs))
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Fact(statement) => write!(f, "fact: {statement}"),
            Sentence::Rule(rule) => write!(f, "rule: {rule}"),
        }
    }
}
