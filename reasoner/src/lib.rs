/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub mod arena;
pub mod config;
pub mod error;
pub mod error_handler;
pub mod knowledge_base;
pub mod parser;
pub mod reasoning;

pub use config::ReasonerConfig;
pub use error::KbError;
pub use knowledge_base::{Fact, Handle, KnowledgeBase, Rule, SupportPair};
pub use reasoning::query::ListOfBindings;
pub use reasoning::retraction::Retraction;
