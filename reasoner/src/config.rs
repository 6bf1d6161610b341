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
use std::path::Path;

use crate::error::KbError;

/// Configuration for knowledge base behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Target every log record of this knowledge base is emitted under
    pub log_target: String,
    /// Also log rule firings that fail to unify
    pub trace_inference: bool,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            log_target: "reasoner".to_string(),
            trace_inference: false,
        }
    }
}

impl ReasonerConfig {
    /// Reads a JSON config; missing fields fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, KbError> {
        serde_json::from_str(json).map_err(|e| KbError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, KbError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| KbError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }
}
