//! CSV sample grammar (spec §4.F): quoted and unquoted fields, rows
//! separated by a line break. Quoted-field scanning is hand-rolled the
//! same way `crate::meta::lexer::string_literal` hand-scans escapes —
//! doubled-quote unescaping needs imperative bookkeeping a
//! compositional combinator chain would not express any more clearly.

use crate::combinator::{choice, literal, map, seq2, star, Parser};
use crate::error::ParseFailure;
use crate::result::ParseResult;

fn quoted_field() -> Parser<String> {
    Parser::new(|input, pos| {
        let rem = crate::combinator::remaining(input, pos);
        if !rem.starts_with('"') {
            return ParseResult::err(
                ParseFailure::new("expected quoted field", pos).expected("'\"'"),
            );
        }
        let mut value = String::new();
        let mut idx = 1;
        loop {
            let tail = match rem.get(idx..) {
                Some(t) => t,
                None => return ParseResult::err(ParseFailure::new("unclosed quoted field", pos)),
            };
            match tail.chars().next() {
                None => return ParseResult::err(ParseFailure::new("unclosed quoted field", pos)),
                Some('"') => {
                    if tail[1..].starts_with('"') {
                        value.push('"');
                        idx += 2;
                    } else {
                        idx += 1;
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    idx += c.len_utf8();
                }
            }
        }
        let consumed = &rem[..idx];
        let next = pos.advance(consumed);
        ParseResult::ok(value, pos, next)
    })
}

fn unquoted_field() -> Parser<String> {
    Parser::new(|input, pos| {
        let rem = crate::combinator::remaining(input, pos);
        let mut idx = 0;
        for c in rem.chars() {
            if c == ',' || c == '\n' || c == '\r' {
                break;
            }
            idx += c.len_utf8();
        }
        let consumed = &rem[..idx];
        let next = pos.advance(consumed);
        ParseResult::ok(consumed.to_string(), pos, next)
    })
}

fn field() -> Parser<String> {
    choice(vec![quoted_field(), unquoted_field()])
}

fn record() -> Parser<Vec<String>> {
    let tail = map(seq2(literal(","), field()), |(_, f)| f);
    map(seq2(field(), star(tail)), |(first, rest)| {
        let mut fields = vec![first];
        fields.extend(rest);
        fields
    })
}

fn line_break() -> Parser<()> {
    map(
        choice(vec![literal("\r\n"), literal("\n"), literal("\r")]),
        |_| (),
    )
}

/// Builds a fresh parser for a complete CSV document: one or more
/// records separated by a line break, each holding one or more fields
/// separated by a comma (spec §4.F).
pub fn csv() -> Parser<Vec<Vec<String>>> {
    let tail = map(seq2(line_break(), record()), |(_, r)| r);
    map(seq2(record(), star(tail)), |(first, rest)| {
        let mut rows = vec![first];
        rows.extend(rest);
        rows
    })
}

/// Parses `source`, ignoring a single trailing line break if present.
pub fn parse_csv(source: &str) -> Result<Vec<Vec<String>>, ParseFailure> {
    let trimmed = source
        .strip_suffix("\r\n")
        .or_else(|| source.strip_suffix('\n'))
        .or_else(|| source.strip_suffix('\r'))
        .unwrap_or(source);
    csv().parse_all(trimmed).into_result()
}
