/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use shared::rule::{Implication, Sentence};
use shared::statement::Statement;

use crate::error::KbError;
use crate::knowledge_base::{Handle, KnowledgeBase, Support, SupportPair};

/// Outcome of [`KnowledgeBase::kb_retract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retraction {
    /// The entity and everything that lost its last support, in deletion order.
    Removed {
        facts: Vec<Statement>,
        rules: Vec<Implication>,
    },
    /// Still derivable, so only the asserted flag was cleared.
    Unasserted,
    /// Purely derived; retracting it directly has no effect.
    StillSupported,
}

impl Retraction {
    pub fn removed_fact(&self, statement: &Statement) -> bool {
        matches!(self, Retraction::Removed { facts, .. } if facts.contains(statement))
    }

    pub fn removed_rule(&self, implication: &Implication) -> bool {
        matches!(self, Retraction::Removed { rules, .. } if rules.contains(implication))
    }
}

impl KnowledgeBase {
    /// Retract a fact or rule.
    ///
    /// An entity with no remaining derivations is deleted, and deletion
    /// cascades to every dependent left without a support pair that was
    /// not itself asserted.
    pub fn kb_retract(&mut self, sentence: &Sentence) -> Result<Retraction, KbError> {
        let Some(handle) = self.find(sentence) else {
            warn!(target: self.target(), "Cannot retract {}: not in knowledge base", sentence);
            return Err(KbError::NotFound(sentence.to_string()));
        };
        info!(target: self.target(), "Retracting {}", sentence);

        let support = self.support_mut(handle).ok_or_else(|| {
            KbError::InvariantViolation(format!("dangling index entry for {sentence}"))
        })?;
        if !support.supported_by.is_empty() {
            if support.asserted {
                support.asserted = false;
                info!(
                    target: self.target(),
                    "{} is still supported, cleared asserted flag",
                    sentence
                );
                return Ok(Retraction::Unasserted);
            }
            debug!(target: self.target(), "{} is derived, leaving it in place", sentence);
            return Ok(Retraction::StillSupported);
        }

        let removed = self.cascade(handle);
        if let Retraction::Removed { facts, rules } = &removed {
            info!(
                target: self.target(),
                "Removed {} fact(s) and {} rule(s)",
                facts.len(),
                rules.len()
            );
        }
        Ok(removed)
    }

    fn cascade(&mut self, root: Handle) -> Retraction {
        let mut worklist = vec![root];
        let mut seen: FxHashSet<Handle> = FxHashSet::default();
        let mut facts = Vec::new();
        let mut rules = Vec::new();

        while let Some(handle) = worklist.pop() {
            if !seen.insert(handle) {
                continue;
            }
            let Some(support) = self.detach(handle, &mut facts, &mut rules) else {
                continue;
            };

            debug_assert!(support.supported_by.is_empty());

            for dependent in support.dependents() {
                if self.strip_pairs_citing(dependent, handle) {
                    worklist.push(dependent);
                }
            }
        }

        Retraction::Removed { facts, rules }
    }

    /// Removes the entity from storage and index, returning its support record.
    fn detach(
        &mut self,
        handle: Handle,
        facts: &mut Vec<Statement>,
        rules: &mut Vec<Implication>,
    ) -> Option<Support> {
        match handle {
            Handle::Fact(id) => {
                let fact = self.facts.remove(id)?;
                self.fact_index.remove(&fact.statement);
                debug!(target: self.target(), "Deleted fact {}", fact.statement);
                facts.push(fact.statement);
                Some(fact.support)
            }
            Handle::Rule(id) => {
                let rule = self.rules.remove(id)?;
                let implication = rule.implication();
                self.rule_index.remove(&implication);
                debug!(target: self.target(), "Deleted rule {}", implication);
                rules.push(implication);
                Some(rule.support)
            }
        }
    }

    /// Drops every pair of `dependent` that cites `removed`. The other premise
    /// of each dropped pair forgets `dependent` unless a surviving pair still
    /// cites it. Returns whether `dependent` is now unsupported and unasserted.
    fn strip_pairs_citing(&mut self, dependent: Handle, removed: Handle) -> bool {
        let Some(support) = self.support_mut(dependent) else {
            return false;
        };
        let (stripped, kept): (Vec<SupportPair>, Vec<SupportPair>) =
            std::mem::take(&mut support.supported_by)
                .into_iter()
                .partition(|pair| pair.cites(removed));
        support.supported_by = kept;
        let orphaned = support.supported_by.is_empty() && !support.asserted;
        let survivors = support.supported_by.clone();

        for pair in stripped {
            for other in pair.premises() {
                if other == removed || survivors.iter().any(|p| p.cites(other)) {
                    continue;
                }
                if let Some(other_support) = self.support_mut(other) {
                    other_support.remove_dependent(dependent);
                }
            }
        }
        orphaned
    }
}
