//! JSON sample grammar (spec §4.F): values, recursive arrays/objects via
//! [`Forward`]. Strings and numbers are hand-scanned the same way
//! `crate::meta::lexer::string_literal` hand-scans escapes, rather than
//! built from character-by-character combinator chains — a lexical
//! token is exactly the boundary where this crate already prefers a
//! direct scan over composition.

use super::support::{lexeme, sym, trivia};
use crate::combinator::{choice, map, seq2, seq3, star, Forward, Parser};
use crate::error::ParseFailure;
use crate::result::ParseResult;

/// A parsed JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

fn json_string() -> Parser<String> {
    lexeme(Parser::new(|input, pos| {
        let rem = crate::combinator::remaining(input, pos);
        if !rem.starts_with('"') {
            return ParseResult::err(ParseFailure::new("expected string", pos).expected("'\"'"));
        }
        let mut value = String::new();
        let mut idx = 1;
        loop {
            let tail = match rem.get(idx..) {
                Some(t) => t,
                None => return ParseResult::err(ParseFailure::new("unclosed string", pos)),
            };
            match tail.chars().next() {
                None => return ParseResult::err(ParseFailure::new("unclosed string", pos)),
                Some('"') => {
                    idx += 1;
                    break;
                }
                Some('\\') => match tail[1..].chars().next() {
                    Some('"') => {
                        value.push('"');
                        idx += 2;
                    }
                    Some('\\') => {
                        value.push('\\');
                        idx += 2;
                    }
                    Some('/') => {
                        value.push('/');
                        idx += 2;
                    }
                    Some('b') => {
                        value.push('\u{8}');
                        idx += 2;
                    }
                    Some('f') => {
                        value.push('\u{c}');
                        idx += 2;
                    }
                    Some('n') => {
                        value.push('\n');
                        idx += 2;
                    }
                    Some('r') => {
                        value.push('\r');
                        idx += 2;
                    }
                    Some('t') => {
                        value.push('\t');
                        idx += 2;
                    }
                    Some('u') => {
                        let hex = match tail.get(2..6) {
                            Some(h) => h,
                            None => {
                                return ParseResult::err(ParseFailure::new(
                                    "truncated unicode escape",
                                    pos,
                                ))
                            }
                        };
                        match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                            Some(c) => {
                                value.push(c);
                                idx += 6;
                            }
                            None => {
                                return ParseResult::err(ParseFailure::new(
                                    format!("invalid unicode escape '{}'", hex),
                                    pos,
                                ))
                            }
                        }
                    }
                    other => {
                        return ParseResult::err(ParseFailure::new(
                            format!("invalid escape sequence '{:?}'", other),
                            pos,
                        ))
                    }
                },
                Some(c) => {
                    value.push(c);
                    idx += c.len_utf8();
                }
            }
        }
        let consumed = &rem[..idx];
        let next = pos.advance(consumed);
        ParseResult::ok(value, pos, next)
    }))
}

fn json_number() -> Parser<f64> {
    lexeme(Parser::new(|input, pos| {
        let rem = crate::combinator::remaining(input, pos);
        let mut idx = 0;
        let bytes = rem.as_bytes();
        if bytes.get(idx) == Some(&b'-') {
            idx += 1;
        }
        let digits_start = idx;
        while bytes.get(idx).is_some_and(|b| b.is_ascii_digit()) {
            idx += 1;
        }
        if idx == digits_start {
            return ParseResult::err(ParseFailure::new("expected number", pos).expected("digit"));
        }
        if bytes.get(idx) == Some(&b'.') {
            idx += 1;
            let frac_start = idx;
            while bytes.get(idx).is_some_and(|b| b.is_ascii_digit()) {
                idx += 1;
            }
            if idx == frac_start {
                return ParseResult::err(ParseFailure::new(
                    "expected digit after decimal point",
                    pos,
                ));
            }
        }
        if matches!(bytes.get(idx), Some(b'e') | Some(b'E')) {
            idx += 1;
            if matches!(bytes.get(idx), Some(b'+') | Some(b'-')) {
                idx += 1;
            }
            let exp_start = idx;
            while bytes.get(idx).is_some_and(|b| b.is_ascii_digit()) {
                idx += 1;
            }
            if idx == exp_start {
                return ParseResult::err(ParseFailure::new(
                    "expected digit in exponent",
                    pos,
                ));
            }
        }
        let consumed = &rem[..idx];
        let value: f64 = consumed
            .parse()
            .expect("scan above only admits valid f64 syntax");
        let next = pos.advance(consumed);
        ParseResult::ok(value, pos, next)
    }))
}

/// Builds a fresh parser for a JSON value (spec §4.F).
pub fn json() -> Parser<JsonValue> {
    let value_forward: Forward<JsonValue> = Forward::new();

    let null = map(sym("null"), |_| JsonValue::Null);
    let bool_true = map(sym("true"), |_| JsonValue::Bool(true));
    let bool_false = map(sym("false"), |_| JsonValue::Bool(false));
    let string = map(json_string(), JsonValue::String);
    let number = map(json_number(), JsonValue::Number);

    let array_tail = map(seq2(sym(","), value_forward.parser()), |(_, v)| v);
    let array_items = choice(vec![
        map(
            seq2(value_forward.parser(), star(array_tail.clone())),
            |(first, rest)| {
                let mut items = vec![first];
                items.extend(rest);
                items
            },
        ),
        map(trivia(), |_| Vec::new()),
    ]);
    let array = map(
        seq3(sym("["), array_items, sym("]")),
        |(_, items, _)| JsonValue::Array(items),
    );

    let member = map(
        seq3(json_string(), sym(":"), value_forward.parser()),
        |(key, _, value)| (key, value),
    );
    let member_tail = map(seq2(sym(","), member.clone()), |(_, m)| m);
    let object_members = choice(vec![
        map(seq2(member, star(member_tail)), |(first, rest)| {
            let mut members = vec![first];
            members.extend(rest);
            members
        }),
        map(trivia(), |_| Vec::new()),
    ]);
    let object = map(
        seq3(sym("{"), object_members, sym("}")),
        |(_, members, _)| JsonValue::Object(members),
    );

    let value = choice(vec![object, array, string, number, bool_true, bool_false, null]);
    value_forward.set(value.clone());
    value
}

/// Parses `source` as a single JSON value, requiring the whole
/// (trivia-trimmed) input to be consumed.
pub fn parse_json(source: &str) -> Result<JsonValue, ParseFailure> {
    map(seq2(json(), trivia()), |(value, _)| value)
        .parse_all(source)
        .into_result()
}
