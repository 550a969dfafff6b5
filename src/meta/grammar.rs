//! The grammar-block layer (spec §4.D):
//!
//! ```text
//! Grammar    = "grammar" Identifier "{" Annotation* Rule* "}"
//! Annotation = "@" Identifier ":" StringLiteral
//! Rule       = Identifier "=" Choice
//! ```
//!
//! Rules and annotations may appear interleaved in source; this layer
//! collects them into one `Vec<Item>` as parsed and only then splits
//! them into the two ordered lists `Grammar` exposes, preserving
//! within-list source order (spec §3).

use crate::ast::{Annotation, Grammar, Rule};
use crate::combinator::{choice, map, seq2, seq4, star, Parser};
use crate::error::TpegError;
use crate::meta::expr::expr;
use crate::meta::lexer::{self, doc_comment_block, identifier, string_literal, sym};
use crate::result::ParseResult;
use std::collections::HashSet;

enum Item {
    Annotation(Annotation),
    Rule(Rule),
}

fn annotation_parser() -> Parser<Annotation> {
    map(
        seq4(sym("@"), identifier(), sym(":"), string_literal()),
        |(_, key, _, (value, _))| Annotation { key, value },
    )
}

fn rule_parser() -> Parser<Rule> {
    map(
        seq4(doc_comment_block(), identifier(), sym("="), expr()),
        |(doc, name, _, pattern)| {
            let rule = Rule::new(name, pattern);
            match doc {
                Some(doc) => rule.with_doc(doc),
                None => rule,
            }
        },
    )
}

fn item_parser() -> Parser<Item> {
    choice(vec![
        map(annotation_parser(), Item::Annotation),
        map(rule_parser(), Item::Rule),
    ])
}

/// Builds a fresh `Parser<Grammar>` for one `grammar { ... }` block.
pub fn grammar() -> Parser<Grammar> {
    let full = seq4(sym("grammar"), identifier(), sym("{"), seq2(star(item_parser()), sym("}")));
    map(full, |(_, name, _, (items, _))| {
        let mut annotations = Vec::new();
        let mut rules = Vec::new();
        for item in items {
            match item {
                Item::Annotation(a) => annotations.push(a),
                Item::Rule(r) => rules.push(r),
            }
        }
        Grammar::new(name, annotations, rules)
    })
}

/// Parses a complete TPEG source file into a [`Grammar`], rejecting
/// trailing garbage past the closing `}` and duplicate rule names.
///
/// Returns `Result<Grammar, TpegError>` rather than the literal
/// `ParseResult<Grammar>` §6 lists: once a whole-file parse has
/// succeeded there is no remaining position for a host to act on, and
/// `DuplicateRule` — detected only after a full syntactic parse — has
/// no position-shaped failure to carry in the first place. See
/// DESIGN.md for the fuller rationale.
pub fn parse_grammar(source: &str) -> Result<Grammar, TpegError> {
    let source = strip_bom(source);
    let body = seq2(grammar(), lexer::eof());
    match body.parse_all(source) {
        ParseResult::Success {
            value: (grammar, _),
            ..
        } => {
            check_duplicate_rules(&grammar)?;
            Ok(grammar)
        }
        ParseResult::Failure(err) => Err(TpegError::from(err)),
    }
}

/// Skips a single leading UTF-8 BOM, per spec §6: "No byte-order-mark
/// handling is required; if present, one leading BOM is skipped."
fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

fn check_duplicate_rules(grammar: &Grammar) -> Result<(), TpegError> {
    let mut seen = HashSet::new();
    for rule in &grammar.rules {
        if !seen.insert(rule.name.as_str()) {
            return Err(TpegError::DuplicateRule {
                name: rule.name.clone(),
            });
        }
    }
    Ok(())
}
