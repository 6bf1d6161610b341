/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// Conditions reported by the knowledge base. None of them are fatal; the
/// knowledge base is left unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KbError {
    /// Retraction target is neither a known fact nor a known rule
    NotFound(String),
    /// `kb_ask` was given something that is not a fact-shaped query
    MalformedQuery(String),
    /// Assertion of a sentence with an empty/variable predicate or a rule without antecedents
    MalformedSentence(String),
    /// Support pairs and back-references disagree. Always a defect.
    InvariantViolation(String),
    Parse(String),
    Config(String),
    Io(String),
    Serialization(String),
}

impl fmt::Display for KbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KbError::NotFound(what) => write!(f, "not found in knowledge base: {what}"),
            KbError::MalformedQuery(what) => write!(f, "invalid ask: {what}"),
            KbError::MalformedSentence(what) => write!(f, "malformed sentence: {what}"),
            KbError::InvariantViolation(what) => {
                write!(f, "support graph invariant violated: {what}")
            }
            KbError::Parse(msg) => write!(f, "parse error: {msg}"),
            KbError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            KbError::Io(msg) => write!(f, "io error: {msg}"),
            KbError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for KbError {}
