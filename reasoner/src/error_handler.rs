/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use nom::error::Error as NomError;
use nom::error::ErrorKind;

/// Renders a nom failure on `input` as a one-line message, the offending
/// line and a caret under the failing column.
pub fn format_parse_error(input: &str, err: nom::Err<NomError<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let offset = input.len() - e.input.len();
            let (line_no, col_no) = line_and_column(input, offset);
            let error_line = input.lines().nth(line_no - 1).unwrap_or("[end of input]");

            let title = detect_specific_error(input).unwrap_or_else(|| {
                let what = match e.code {
                    ErrorKind::Tag => "expected `fact:`, `rule:` or `->`",
                    ErrorKind::Char => "expected a parenthesis",
                    ErrorKind::Alt => "expected a fact or a rule",
                    ErrorKind::TakeWhile1 => "expected a predicate or term",
                    ErrorKind::Many1 => "expected at least one antecedent",
                    ErrorKind::Eof => "unexpected trailing input",
                    _ => "syntax error",
                };
                what.to_string()
            });

            format!(
                "{} at line {}, column {}\n  {}\n  {}^",
                title,
                line_no,
                col_no,
                error_line,
                " ".repeat(col_no.saturating_sub(1))
            )
        }
        nom::Err::Incomplete(_) => "incomplete sentence".to_string(),
    }
}

fn line_and_column(input: &str, offset: usize) -> (usize, usize) {
    let mut line_no = 1;
    let mut col_no = 1;
    for (i, c) in input.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_no += 1;
            col_no = 1;
        } else {
            col_no += 1;
        }
    }
    (line_no, col_no)
}

fn detect_specific_error(input: &str) -> Option<String> {
    let trimmed = input.trim_start();
    if !trimmed.starts_with("fact:") && !trimmed.starts_with("rule:") {
        return Some("sentence must start with `fact:` or `rule:`".to_string());
    }
    let opened = input.matches('(').count();
    let closed = input.matches(')').count();
    if opened != closed {
        return Some(format!(
            "unbalanced parentheses ({} opening, {} closing)",
            opened, closed
        ));
    }
    if trimmed.starts_with("rule:") && !input.contains("->") && !input.contains(',') {
        return Some("rule is missing `->` between antecedents and consequent".to_string());
    }
    None
}
