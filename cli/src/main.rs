/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use log::{error, warn};
use reasoner::parser::parse_sentence;
use reasoner::{KbError, KnowledgeBase, ReasonerConfig, Retraction};
use shared::rule::Sentence;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "kb-cli",
    version = "0.1.0",
    author = "Volodymyr Kadzhaia <vkadzhaia@gmail.com>, Pieter Bonte <pieter.bonte@kuleuven.be>",
    about = "Load a knowledge base, then ask and retract against it",
    long_about = "Loads `fact:` and `rule:` sentences, forward-chains them to saturation \
                  and then runs the given retractions and queries in order. Queries take \
                  the form `fact: (pred ?x ...)`."
)]
struct Args {
    #[arg(short, long, help = "Knowledge base file, one sentence per line", value_name = "FILE")]
    file: PathBuf,

    #[arg(short, long, help = "JSON reasoner configuration", value_name = "CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Sentence to retract (repeatable)", value_name = "SENTENCE")]
    retract: Vec<String>,

    #[arg(short, long, help = "Query to ask after retractions (repeatable)", value_name = "QUERY")]
    ask: Vec<String>,

    #[arg(short, long, help = "Print the knowledge base as JSON when done")]
    dump: bool,
}

fn parse_arg(text: &str) -> Result<Sentence, KbError> {
    parse_sentence(text).map_err(KbError::Parse)
}

/// Applies each retraction in order. A sentence that is unknown or does not
/// parse is reported and skipped.
fn retract_all<W: Write>(
    kb: &mut KnowledgeBase,
    sentences: &[String],
    out: &mut W,
) -> io::Result<()> {
    for text in sentences {
        let sentence = match parse_arg(text) {
            Ok(sentence) => sentence,
            Err(e) => {
                warn!("{}", e);
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        match kb.kb_retract(&sentence) {
            Ok(Retraction::Removed { facts, rules }) => {
                writeln!(out, "Retracted {}", sentence)?;
                for fact in facts {
                    writeln!(out, "  removed fact: {}", fact)?;
                }
                for rule in rules {
                    writeln!(out, "  removed rule: {}", rule)?;
                }
            }
            Ok(Retraction::Unasserted) => {
                writeln!(out, "{} is still supported; no longer asserted", sentence)?
            }
            Ok(Retraction::StillSupported) => {
                writeln!(out, "{} is derived; nothing retracted", sentence)?
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
    Ok(())
}

/// Answers each query in order. A malformed query is reported and answered
/// with `False`.
fn ask_all<W: Write>(kb: &KnowledgeBase, queries: &[String], out: &mut W) -> io::Result<()> {
    for text in queries {
        let query = match parse_arg(text) {
            Ok(query) => query,
            Err(e) => {
                report(out, &e)?;
                continue;
            }
        };
        writeln!(out, "Asking {}", query)?;
        match kb.try_ask(&query) {
            Ok(Some(answers)) => writeln!(out, "{}", answers)?,
            Ok(None) => writeln!(out, "False")?,
            Err(e) => report(out, &e)?,
        }
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, e: &KbError) -> io::Result<()> {
    warn!("{}", e);
    writeln!(out, "{}", e)?;
    writeln!(out, "False")
}

fn run(args: Args) -> Result<(), KbError> {
    let config = match &args.config {
        Some(path) => ReasonerConfig::from_file(path)?,
        None => ReasonerConfig::default(),
    };

    let mut kb = KnowledgeBase::with_config(config);
    let loaded = kb.load_file(&args.file)?;
    println!(
        "Loaded {} sentence(s): {} fact(s), {} rule(s)",
        loaded,
        kb.fact_count(),
        kb.rule_count()
    );

    let mut out = io::stdout().lock();
    retract_all(&mut kb, &args.retract, &mut out).map_err(|e| KbError::Io(e.to_string()))?;
    ask_all(&kb, &args.ask, &mut out).map_err(|e| KbError::Io(e.to_string()))?;

    if args.dump {
        writeln!(out, "{}", kb.snapshot().to_json()?).map_err(|e| KbError::Io(e.to_string()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
