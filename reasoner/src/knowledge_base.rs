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
use rustc_hash::FxHashMap;
use serde::Serialize;
use shared::rule::{Implication, Sentence};
use shared::statement::Statement;
use std::fmt;
use std::path::Path;

use crate::arena::{Arena, ID};
use crate::config::ReasonerConfig;
use crate::error::KbError;
use crate::parser::parse_kb;
use crate::reasoning::unification::well_formed;

/// One derivation of a fact or rule: `fact` matched the first antecedent of `rule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SupportPair {
    pub fact: ID<Fact>,
    pub rule: ID<Rule>,
}

impl SupportPair {
    pub fn new(fact: ID<Fact>, rule: ID<Rule>) -> Self {
        Self { fact, rule }
    }

    pub fn cites(&self, premise: Handle) -> bool {
        match premise {
            Handle::Fact(id) => self.fact == id,
            Handle::Rule(id) => self.rule == id,
        }
    }

    pub fn premises(&self) -> [Handle; 2] {
        [Handle::Fact(self.fact), Handle::Rule(self.rule)]
    }
}

/// Handle to either kind of entity stored in a [`KnowledgeBase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Fact(ID<Fact>),
    Rule(ID<Rule>),
}

/// Justification bookkeeping carried by both facts and rules.
///
/// `supported_by` lists the derivations of this entity; `supports_facts` and
/// `supports_rules` are the reverse edges, naming every entity that has a
/// pair citing this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Support {
    pub(crate) asserted: bool,
    pub(crate) supported_by: Vec<SupportPair>,
    pub(crate) supports_facts: Vec<ID<Fact>>,
    pub(crate) supports_rules: Vec<ID<Rule>>,
}

impl Support {
    fn asserted() -> Self {
        Self {
            asserted: true,
            ..Self::default()
        }
    }

    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn supported_by(&self) -> &[SupportPair] {
        &self.supported_by
    }

    pub fn supports_facts(&self) -> &[ID<Fact>] {
        &self.supports_facts
    }

    pub fn supports_rules(&self) -> &[ID<Rule>] {
        &self.supports_rules
    }

    pub(crate) fn dependents(&self) -> impl Iterator<Item = Handle> + '_ {
        self.supports_facts
            .iter()
            .map(|id| Handle::Fact(*id))
            .chain(self.supports_rules.iter().map(|id| Handle::Rule(*id)))
    }

    pub(crate) fn has_dependent(&self, dependent: Handle) -> bool {
        match dependent {
            Handle::Fact(id) => self.supports_facts.contains(&id),
            Handle::Rule(id) => self.supports_rules.contains(&id),
        }
    }

    pub(crate) fn add_dependent(&mut self, dependent: Handle) {
        if self.has_dependent(dependent) {
            return;
        }
        match dependent {
            Handle::Fact(id) => self.supports_facts.push(id),
            Handle::Rule(id) => self.supports_rules.push(id),
        }
    }

    pub(crate) fn remove_dependent(&mut self, dependent: Handle) {
        match dependent {
            Handle::Fact(id) => self.supports_facts.retain(|d| *d != id),
            Handle::Rule(id) => self.supports_rules.retain(|d| *d != id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub(crate) statement: Statement,
    pub(crate) support: Support,
}

impl Fact {
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn support(&self) -> &Support {
        &self.support
    }

    pub fn is_asserted(&self) -> bool {
        self.support.asserted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) lhs: Vec<Statement>,
    pub(crate) rhs: Statement,
    pub(crate) support: Support,
}

impl Rule {
    pub fn lhs(&self) -> &[Statement] {
        &self.lhs
    }

    pub fn rhs(&self) -> &Statement {
        &self.rhs
    }

    pub fn support(&self) -> &Support {
        &self.support
    }

    pub fn is_asserted(&self) -> bool {
        self.support.asserted
    }

    pub fn implication(&self) -> Implication {
        Implication::new(self.lhs.clone(), self.rhs.clone())
    }
}

/// Facts and rules with their support graph.
///
/// Entities are owned by two arenas and refer to each other only through
/// [`ID`]s. Structural indexes make sure no two entities share the same
/// statement (facts) or the same antecedents and consequent (rules).
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub(crate) facts: Arena<Fact>,
    pub(crate) rules: Arena<Rule>,
    pub(crate) fact_index: FxHashMap<Statement, ID<Fact>>,
    pub(crate) rule_index: FxHashMap<Implication, ID<Rule>>,
    pub(crate) config: ReasonerConfig,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::with_config(ReasonerConfig::default())
    }

    pub fn with_config(config: ReasonerConfig) -> Self {
        Self {
            facts: Arena::new(),
            rules: Arena::new(),
            fact_index: FxHashMap::default(),
            rule_index: FxHashMap::default(),
            config,
        }
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    pub(crate) fn target(&self) -> &str {
        &self.config.log_target
    }

    pub fn facts(&self) -> impl ExactSizeIterator<Item = (ID<Fact>, &Fact)> {
        self.facts.iter()
    }

    pub fn rules(&self) -> impl ExactSizeIterator<Item = (ID<Rule>, &Rule)> {
        self.rules.iter()
    }

    pub fn fact(&self, id: ID<Fact>) -> Option<&Fact> {
        self.facts.get(id)
    }

    pub fn rule(&self, id: ID<Rule>) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn find_fact(&self, statement: &Statement) -> Option<ID<Fact>> {
        self.fact_index.get(statement).copied()
    }

    pub fn find_rule(&self, implication: &Implication) -> Option<ID<Rule>> {
        self.rule_index.get(implication).copied()
    }

    /// Locates the entity structurally equal to `sentence`.
    pub fn find(&self, sentence: &Sentence) -> Option<Handle> {
        match sentence {
            Sentence::Fact(statement) => self.find_fact(statement).map(Handle::Fact),
            Sentence::Rule(implication) => self.find_rule(implication).map(Handle::Rule),
        }
    }

    pub fn support(&self, handle: Handle) -> Option<&Support> {
        match handle {
            Handle::Fact(id) => self.facts.get(id).map(|f| &f.support),
            Handle::Rule(id) => self.rules.get(id).map(|r| &r.support),
        }
    }

    pub(crate) fn support_mut(&mut self, handle: Handle) -> Option<&mut Support> {
        match handle {
            Handle::Fact(id) => self.facts.get_mut(id).map(|f| &mut f.support),
            Handle::Rule(id) => self.rules.get_mut(id).map(|r| &mut r.support),
        }
    }

    /// Text form of an entity for logs and snapshots.
    pub fn describe(&self, handle: Handle) -> String {
        match handle {
            Handle::Fact(id) => self
                .facts
                .get(id)
                .map(|f| f.statement.to_string())
                .unwrap_or_else(|| format!("<removed fact {}>", id.index())),
            Handle::Rule(id) => self
                .rules
                .get(id)
                .map(|r| r.implication().to_string())
                .unwrap_or_else(|| format!("<removed rule {}>", id.index())),
        }
    }

    /// Assert a fact or rule, then forward-chain it against the opposite collection.
    ///
    /// Asserting something already present does not create a second entity;
    /// the existing one is marked as asserted instead.
    pub fn kb_assert(&mut self, sentence: Sentence) -> Result<Handle, KbError> {
        check_sentence(&sentence)?;
        debug!(target: self.target(), "Asserting {}", sentence);
        if let Sentence::Rule(implication) = &sentence {
            let unbound = implication.unbound_variables();
            if !unbound.is_empty() {
                warn!(
                    target: self.target(),
                    "Consequent of {} has unbound variable(s) ?{}",
                    implication,
                    unbound.join(", ?")
                );
            }
        }
        Ok(self.kb_add(sentence, None))
    }

    /// Insert or merge one entity. `derivation` is `None` for direct
    /// assertions and the justifying pair for inferred entities.
    pub(crate) fn kb_add(&mut self, sentence: Sentence, derivation: Option<SupportPair>) -> Handle {
        let existing = self.find(&sentence);
        if let Some(handle) = existing {
            self.merge(handle, derivation);
            return handle;
        }

        let support = match derivation {
            Some(_) => Support::default(),
            None => Support::asserted(),
        };

        let handle = match sentence {
            Sentence::Fact(statement) => {
                let id = self.facts.insert(Fact {
                    statement: statement.clone(),
                    support,
                });
                self.fact_index.insert(statement, id);
                Handle::Fact(id)
            }
            Sentence::Rule(implication) => {
                let id = self.rules.insert(Rule {
                    lhs: implication.lhs.clone(),
                    rhs: implication.rhs.clone(),
                    support,
                });
                self.rule_index.insert(implication, id);
                Handle::Rule(id)
            }
        };
        debug!(target: self.target(), "Adding {}", self.describe(handle));

        if let Some(pair) = derivation {
            self.add_support(handle, pair);
        }

        // Snapshot the opposite side: entities inserted by the nested
        // inference below are chained against this one on their own insert.
        match handle {
            Handle::Fact(fact_id) => {
                let rule_ids: Vec<ID<Rule>> = self.rules.ids().collect();
                for rule_id in rule_ids {
                    self.fc_infer(fact_id, rule_id);
                }
            }
            Handle::Rule(rule_id) => {
                let fact_ids: Vec<ID<Fact>> = self.facts.ids().collect();
                for fact_id in fact_ids {
                    self.fc_infer(fact_id, rule_id);
                }
            }
        }

        handle
    }

    fn merge(&mut self, handle: Handle, derivation: Option<SupportPair>) {
        match derivation {
            Some(pair) => {
                if self.add_support(handle, pair) {
                    debug!(
                        target: self.target(),
                        "Merged new support into {}",
                        self.describe(handle)
                    );
                }
            }
            None => {
                if let Some(support) = self.support_mut(handle) {
                    support.asserted = true;
                }
                debug!(target: self.target(), "Marked {} as asserted", self.describe(handle));
            }
        }
    }

    /// Record `pair` as a derivation of `derived` together with the matching
    /// back-references on both premises. Returns `false` if the pair was
    /// already recorded or names `derived` itself as a premise.
    pub(crate) fn add_support(&mut self, derived: Handle, pair: SupportPair) -> bool {
        if pair.cites(derived) {
            debug!(
                target: self.target(),
                "Ignoring self-citing support for {}",
                self.describe(derived)
            );
            return false;
        }
        let Some(support) = self.support_mut(derived) else {
            return false;
        };
        if support.supported_by.contains(&pair) {
            return false;
        }
        support.supported_by.push(pair);

        for premise in pair.premises() {
            if let Some(premise_support) = self.support_mut(premise) {
                premise_support.add_dependent(derived);
            }
        }
        true
    }

    /// Assert every sentence of a knowledge-base document.
    pub fn load_str(&mut self, text: &str) -> Result<usize, KbError> {
        let sentences = parse_kb(text).map_err(KbError::Parse)?;
        let count = sentences.len();
        for sentence in sentences {
            self.kb_assert(sentence)?;
        }
        Ok(count)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize, KbError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| KbError::Io(format!("{}: {}", path.display(), e)))?;
        self.load_str(&text)
    }

    /// Checks that the support graph is bidirectionally consistent and that
    /// the structural indexes agree with the arenas.
    pub fn validate(&self) -> Result<(), KbError> {
        let violation = |msg: String| Err(KbError::InvariantViolation(msg));

        if self.fact_index.len() != self.facts.len() || self.rule_index.len() != self.rules.len() {
            return violation("structural index out of sync with storage".to_string());
        }
        for (id, fact) in self.facts.iter() {
            if self.fact_index.get(&fact.statement) != Some(&id) {
                return violation(format!("fact {} missing from index", fact.statement));
            }
        }
        for (id, rule) in self.rules.iter() {
            if self.rule_index.get(&rule.implication()) != Some(&id) {
                return violation(format!("rule {} missing from index", rule.implication()));
            }
        }

        let handles = self
            .facts
            .ids()
            .map(Handle::Fact)
            .chain(self.rules.ids().map(Handle::Rule))
            .collect::<Vec<_>>();

        for handle in handles {
            let Some(support) = self.support(handle) else {
                continue;
            };

            for (i, pair) in support.supported_by.iter().enumerate() {
                if support.supported_by[..i].contains(pair) {
                    return violation(format!(
                        "duplicate support pair on {}",
                        self.describe(handle)
                    ));
                }
                for premise in pair.premises() {
                    match self.support(premise) {
                        None => {
                            return violation(format!(
                                "{} cites a removed premise",
                                self.describe(handle)
                            ))
                        }
                        Some(premise_support) if !premise_support.has_dependent(handle) => {
                            return violation(format!(
                                "{} does not list {} as a dependent",
                                self.describe(premise),
                                self.describe(handle)
                            ))
                        }
                        Some(_) => {}
                    }
                }
            }

            for dependent in support.dependents() {
                let cited = self
                    .support(dependent)
                    .map(|d| d.supported_by.iter().any(|pair| pair.cites(handle)));
                match cited {
                    None => {
                        return violation(format!(
                            "{} points at a removed dependent",
                            self.describe(handle)
                        ))
                    }
                    Some(false) => {
                        return violation(format!(
                            "{} lists {} as a dependent without a support pair",
                            self.describe(handle),
                            self.describe(dependent)
                        ))
                    }
                    Some(true) => {}
                }
            }
        }
        Ok(())
    }

    /// Serialisable view of every entity and its derivations.
    pub fn snapshot(&self) -> KbSnapshot {
        let entry = |handle: Handle| {
            let support = self.support(handle).cloned().unwrap_or_default();
            EntrySnapshot {
                sentence: self.describe(handle),
                asserted: support.asserted,
                supported_by: support
                    .supported_by
                    .iter()
                    .map(|pair| PairSnapshot {
                        fact: self.describe(Handle::Fact(pair.fact)),
                        rule: self.describe(Handle::Rule(pair.rule)),
                    })
                    .collect(),
            }
        };

        KbSnapshot {
            facts: self.facts.ids().map(|id| entry(Handle::Fact(id))).collect(),
            rules: self.rules.ids().map(|id| entry(Handle::Rule(id))).collect(),
        }
    }
}

fn check_sentence(sentence: &Sentence) -> Result<(), KbError> {
    let ok = match sentence {
        Sentence::Fact(statement) => well_formed(statement),
        Sentence::Rule(implication) => {
            !implication.lhs.is_empty()
                && implication.lhs.iter().all(well_formed)
                && well_formed(&implication.rhs)
        }
    };
    if ok {
        Ok(())
    } else {
        Err(KbError::MalformedSentence(sentence.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairSnapshot {
    pub fact: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub sentence: String,
    pub asserted: bool,
    pub supported_by: Vec<PairSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KbSnapshot {
    pub facts: Vec<EntrySnapshot>,
    pub rules: Vec<EntrySnapshot>,
}

impl KbSnapshot {
    pub fn to_json(&self) -> Result<String, KbError> {
        serde_json::to_string_pretty(self).map_err(|e| KbError::Serialization(e.to_string()))
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Base:")?;
        for fact in self.facts.items() {
            writeln!(f, "fact: {}", fact.statement)?;
        }
        for rule in self.rules.items() {
            writeln!(f, "rule: {}", rule.implication())?;
        }
        Ok(())
    }
}
