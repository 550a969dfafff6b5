use super::{remaining, unexpected_end, Parser};
use crate::ast::CharRange;
use crate::error::ParseFailure;
use crate::position::Position;
use crate::result::ParseResult;

/// Succeeds iff the input at `pos` begins with `s`, consuming `s`'s
/// length in bytes. Fails with `expected: s` otherwise (spec §4.B).
pub fn literal(s: impl Into<String>) -> Parser<String> {
    let needle = s.into();
    Parser::new(move |input, pos| {
        let rem = remaining(input, pos);
        if rem.starts_with(needle.as_str()) {
            let next = pos.advance(&needle);
            ParseResult::ok(needle.clone(), pos, next)
        } else {
            let found = rem.chars().next().map(|c| c.to_string());
            let mut failure = ParseFailure::new(
                format!("expected literal {:?}", needle),
                pos,
            )
            .expected(format!("{:?}", needle));
            if let Some(found) = found {
                failure = failure.found(found);
            }
            ParseResult::err(failure)
        }
    })
}

/// Succeeds with one Unicode scalar value consumed; fails at
/// end-of-input (spec §4.B `any`). Positions count UTF-8 bytes
/// (Design Notes), so the position advances by `c.len_utf8()` bytes
/// for whatever `char` was consumed, not by a fixed width.
pub fn any() -> Parser<char> {
    Parser::new(|input, pos| {
        let rem = remaining(input, pos);
        match rem.chars().next() {
            Some(c) => {
                let next = pos.advance(&rem[..c.len_utf8()]);
                ParseResult::ok(c, pos, next)
            }
            None => ParseResult::err(unexpected_end(pos)),
        }
    })
}

/// Succeeds on one character matching any of `ranges`, or (when
/// `negated`) on one character matching none of them. A negated class
/// at end-of-input fails — there is no character present to negate
/// (spec §8 boundary behavior).
pub fn character_class(ranges: Vec<CharRange>, negated: bool) -> Parser<char> {
    Parser::new(move |input, pos| {
        let rem = remaining(input, pos);
        match rem.chars().next() {
            Some(c) => {
                let matched = ranges.iter().any(|r| r.matches(c));
                if matched != negated {
                    let next = pos.advance(&rem[..c.len_utf8()]);
                    ParseResult::ok(c, pos, next)
                } else {
                    ParseResult::err(
                        ParseFailure::new("character class did not match", pos)
                            .expected(describe_class(&ranges, negated))
                            .found(c.to_string()),
                    )
                }
            }
            None => ParseResult::err(unexpected_end(pos)),
        }
    })
}

fn describe_class(ranges: &[CharRange], negated: bool) -> String {
    let mut s = String::from("[");
    if negated {
        s.push('^');
    }
    for r in ranges {
        match r.end {
            Some(end) => s.push_str(&format!("{}-{}", r.start, end)),
            None => s.push(r.start),
        }
    }
    s.push(']');
    s
}

/// Runs children left-to-right, failing on the first child that
/// fails. No partial consumption is observable by the caller: a
/// `Failure` carries no value, so a caller can never distinguish
/// "some children matched, then one failed" from "the first one
/// failed" — the effect spec §4.B calls "restoring position to the
/// sequence's start".
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    Parser::new(move |input, pos| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut current = pos;
        for parser in &parsers {
            match parser.parse(input, current) {
                ParseResult::Success { value, next, .. } => {
                    values.push(value);
                    current = next;
                }
                ParseResult::Failure(err) => return ParseResult::Failure(err),
            }
        }
        ParseResult::ok(values, pos, current)
    })
}

/// Tries children left-to-right, returning the first success. If every
/// alternative fails, returns the failure reported at the deepest
/// position reached; ties are broken by alternative order (spec §4.B).
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    Parser::new(move |input, pos| {
        let mut deepest: Option<ParseFailure> = None;
        for parser in &parsers {
            match parser.parse(input, pos) {
                success @ ParseResult::Success { .. } => return success,
                ParseResult::Failure(err) => {
                    let replace = match &deepest {
                        Some(current) => err.depth() > current.depth(),
                        None => true,
                    };
                    if replace {
                        deepest = Some(err);
                    }
                }
            }
        }
        ParseResult::err(deepest.unwrap_or_else(|| ParseFailure::new("no alternatives", pos)))
    })
}

/// Greedy zero-or-more. Stops at the first failure, or at the first
/// iteration that succeeds without consuming input — the latter guard
/// is what keeps `star` terminating on every finite input (spec §8
/// invariant 3) even when given a nullable child.
pub fn star<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |input, pos| {
        let mut values = Vec::new();
        let mut current = pos;
        loop {
            match parser.parse(input, current) {
                ParseResult::Success { value, next, .. } => {
                    if next.offset == current.offset {
                        break;
                    }
                    values.push(value);
                    current = next;
                }
                ParseResult::Failure(_) => break,
            }
        }
        ParseResult::ok(values, pos, current)
    })
}

/// `sequence(p, star(p))` semantics, returning a non-empty list (spec
/// §4.B `plus`).
pub fn plus<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let tail = star(parser.clone());
    Parser::new(move |input, pos| match parser.parse(input, pos) {
        ParseResult::Success {
            value,
            next: first_next,
            ..
        } => {
            let mut values = vec![value];
            match tail.parse(input, first_next) {
                ParseResult::Success {
                    value: rest,
                    next, ..
                } => {
                    values.extend(rest);
                    ParseResult::ok(values, pos, next)
                }
                ParseResult::Failure(err) => ParseResult::Failure(err),
            }
        }
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

/// Zero- or one-element result. Never fails (spec §4.B `optional`).
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    Parser::new(move |input, pos| match parser.parse(input, pos) {
        ParseResult::Success { value, next, .. } => ParseResult::ok(Some(value), pos, next),
        ParseResult::Failure(_) => ParseResult::ok(None, pos, pos),
    })
}

/// Bounded repetition: `min` mandatory matches, then up to `max`
/// (unbounded when absent) more. A native primitive offered for
/// ergonomic combinator use; the generator instead expands
/// `Quantified` nodes per spec §4.E since the sample grammars never
/// reference this constructor directly.
pub fn quantified<T: 'static>(parser: Parser<T>, min: usize, max: Option<usize>) -> Parser<Vec<T>> {
    Parser::new(move |input, pos| {
        let mut values = Vec::new();
        let mut current = pos;
        loop {
            if let Some(max) = max {
                if values.len() >= max {
                    break;
                }
            }
            match parser.parse(input, current) {
                ParseResult::Success { value, next, .. } => {
                    if next.offset == current.offset {
                        break;
                    }
                    values.push(value);
                    current = next;
                }
                ParseResult::Failure(err) => {
                    if values.len() < min {
                        return ParseResult::Failure(err);
                    }
                    break;
                }
            }
        }
        if values.len() < min {
            return ParseResult::err(ParseFailure::new(
                format!("expected at least {} repetitions, found {}", min, values.len()),
                pos,
            ));
        }
        ParseResult::ok(values, pos, current)
    })
}

/// Positive lookahead: succeeds iff `parser` succeeds, consuming
/// nothing regardless of outcome (spec §4.B `and`).
pub fn and_<T: 'static>(parser: Parser<T>) -> Parser<()> {
    Parser::new(move |input, pos| match parser.parse(input, pos) {
        ParseResult::Success { .. } => ParseResult::ok((), pos, pos),
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

/// Negative lookahead: succeeds iff `parser` fails, consuming nothing
/// regardless of outcome (spec §4.B `not`).
pub fn not_<T: 'static>(parser: Parser<T>) -> Parser<()> {
    Parser::new(move |input, pos| match parser.parse(input, pos) {
        ParseResult::Success { .. } => {
            ParseResult::err(ParseFailure::new("unexpected match under negative lookahead", pos))
        }
        ParseResult::Failure(_) => ParseResult::ok((), pos, pos),
    })
}

/// Applies `f` to the value of a successful parse; preserves failure
/// verbatim (spec §4.B `map`).
pub fn map<A: 'static, B: 'static>(parser: Parser<A>, f: impl Fn(A) -> B + 'static) -> Parser<B> {
    Parser::new(move |input, pos| parser.parse(input, pos).map(&f))
}
