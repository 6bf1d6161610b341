/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, warn};
use shared::bindings::Bindings;
use shared::rule::Sentence;
use std::fmt;
use std::ops::Index;

use crate::arena::ID;
use crate::error::KbError;
use crate::knowledge_base::{Fact, KnowledgeBase};
use crate::reasoning::unification::{factq, match_statements};

/// Answers to a query: one set of bindings per matching fact, in the order
/// the facts were added, each with the fact that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfBindings {
    answers: Vec<(Bindings, Vec<ID<Fact>>)>,
}

impl ListOfBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bindings(&mut self, bindings: Bindings, facts: Vec<ID<Fact>>) {
        self.answers.push((bindings, facts));
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bindings> {
        self.answers.iter().map(|(bindings, _)| bindings)
    }

    pub fn supporting_facts(&self, i: usize) -> Option<&[ID<Fact>]> {
        self.answers.get(i).map(|(_, facts)| facts.as_slice())
    }
}

impl Index<usize> for ListOfBindings {
    type Output = Bindings;

    fn index(&self, i: usize) -> &Bindings {
        &self.answers[i].0
    }
}

impl fmt::Display for ListOfBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (bindings, _)) in self.answers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{bindings}")?;
        }
        Ok(())
    }
}

impl KnowledgeBase {
    /// Matches `query` against every stored fact.
    ///
    /// `Ok(None)` means nothing matched; a non-fact or ill-formed query is
    /// rejected with [`KbError::MalformedQuery`].
    pub fn try_ask(&self, query: &Sentence) -> Result<Option<ListOfBindings>, KbError> {
        debug!(target: self.target(), "Asking {}", query);
        let Sentence::Fact(statement) = query else {
            return Err(KbError::MalformedQuery(query.to_string()));
        };
        if !factq(query) {
            return Err(KbError::MalformedQuery(query.to_string()));
        }

        let mut answers = ListOfBindings::new();
        for (id, fact) in self.facts.iter() {
            if let Some(bindings) = match_statements(statement, &fact.statement) {
                answers.add_bindings(bindings, vec![id]);
            }
        }
        Ok(if answers.is_empty() { None } else { Some(answers) })
    }

    /// Like [`KnowledgeBase::try_ask`], but a malformed query is logged and
    /// answered with `None`.
    pub fn kb_ask(&self, query: &Sentence) -> Option<ListOfBindings> {
        match self.try_ask(query) {
            Ok(answers) => answers,
            Err(e) => {
                warn!(target: self.target(), "{}", e);
                None
            }
        }
    }
}
