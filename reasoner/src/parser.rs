/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map},
    multi::{many0, many1},
    sequence::{preceded, terminated},
    IResult,
};
use shared::rule::Sentence;
use shared::statement::Statement;
use shared::terms::Term;

use crate::error_handler::format_parse_error;

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn parse_symbol(input: &str) -> IResult<&str, &str> {
    take_while1(is_symbol_char)(input)
}

/// `?name` or a bare constant
fn parse_term(input: &str) -> IResult<&str, Term> {
    alt((
        map(preceded(tag("?"), parse_symbol), Term::var),
        map(parse_symbol, Term::constant),
    ))(input)
}

/// `(predicate term ...)`
pub fn parse_statement(input: &str) -> IResult<&str, Statement> {
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, predicate) = parse_symbol(input)?;
    let (input, terms) = many0(preceded(multispace1, parse_term))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Statement::new(predicate, terms)))
}

fn parse_fact(input: &str) -> IResult<&str, Sentence> {
    let (input, _) = tag("fact:")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, statement) = parse_statement(input)?;
    Ok((input, Sentence::Fact(statement)))
}

/// `rule: ((a ?x) (b ?x)) -> (c ?x)`; a comma is accepted in place of `->`.
fn parse_rule(input: &str) -> IResult<&str, Sentence> {
    let (input, _) = tag("rule:")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(')(input)?;
    let (input, lhs) = many1(preceded(multispace0, parse_statement))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = alt((tag("->"), tag(",")))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, rhs) = parse_statement(input)?;
    Ok((input, Sentence::rule(lhs, rhs)))
}

fn parse_sentence_inner(input: &str) -> IResult<&str, Sentence> {
    let (input, _) = multispace0(input)?;
    terminated(alt((parse_fact, parse_rule)), multispace0)(input)
}

/// Parses exactly one `fact:` or `rule:` sentence.
pub fn parse_sentence(input: &str) -> Result<Sentence, String> {
    match all_consuming(parse_sentence_inner)(input) {
        Ok((_, sentence)) => Ok(sentence),
        Err(e) => Err(format_parse_error(input, e)),
    }
}

/// Parses a knowledge-base document with one sentence per line. Blank lines
/// and lines starting with `#` or `;` are skipped.
pub fn parse_kb(input: &str) -> Result<Vec<Sentence>, String> {
    let mut sentences = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        let sentence = parse_sentence(trimmed).map_err(|e| format!("line {}: {}", line_no + 1, e))?;
        sentences.push(sentence);
    }
    Ok(sentences)
}
