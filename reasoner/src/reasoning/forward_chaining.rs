/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, trace};
use shared::rule::{Implication, Sentence};

use crate::arena::ID;
use crate::knowledge_base::{Fact, KnowledgeBase, Rule, SupportPair};
use crate::reasoning::unification::{instantiate, match_statements};

impl KnowledgeBase {
    /// Fire `rule` against `fact` if the fact matches the rule's first antecedent.
    ///
    /// A rule with a single antecedent yields a fact; a longer rule yields a
    /// new rule over the remaining, instantiated antecedents. Either way the
    /// result is recorded as supported by `(fact, rule)` and chained further.
    pub fn fc_infer(&mut self, fact_id: ID<Fact>, rule_id: ID<Rule>) {
        let (Some(fact), Some(rule)) = (self.facts.get(fact_id), self.rules.get(rule_id)) else {
            return;
        };
        let Some(first) = rule.lhs.first() else {
            return;
        };

        let Some(bindings) = match_statements(&fact.statement, first) else {
            if self.config.trace_inference {
                trace!(
                    target: self.target(),
                    "{} does not fire on {}",
                    rule.implication(),
                    fact.statement
                );
            }
            return;
        };

        let rhs = instantiate(&rule.rhs, &bindings);
        let derived = if rule.lhs.len() == 1 {
            Sentence::Fact(rhs)
        } else {
            let rest = rule.lhs[1..]
                .iter()
                .map(|antecedent| instantiate(antecedent, &bindings))
                .collect();
            Sentence::Rule(Implication::new(rest, rhs))
        };

        if self.config.trace_inference {
            trace!(
                target: self.target(),
                "{} fired on {} with {{{}}}",
                rule.implication(),
                fact.statement,
                bindings
            );
        }
        debug!(target: self.target(), "Inferred {}", derived);

        self.kb_add(derived, Some(SupportPair::new(fact_id, rule_id)));
    }
}
