//! The lexical layer of the TPEG meta-grammar (spec §4.D "Lexical
//! layer"): whitespace/comment skipping, identifiers, string-literal
//! and character-class escape decoding, built directly on top of raw
//! position scanning the same way `lang_pt::lexeme::Pattern` scans
//! directly against `Code` rather than composing finer combinators for
//! every token — a lexical layer is allowed to be a hand-written
//! terminal, not every primitive in it needs to be assembled from
//! `crate::combinator`.

use crate::ast::CharRange;
use crate::combinator::{remaining, Parser};
use crate::position::Position;
use crate::result::ParseResult;
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap());
static QUALIFIED_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());

/// Skip whitespace (space, tab, CR, LF) and `//...`/`///...` line
/// comments. Doc comments are lexed identically to plain comments here
/// — the distinction is picked up separately by [`doc_comment_block`]
/// immediately before a `Rule` (spec.md: "doc comments `///…` treated
/// identically to parsing, but flagged for later tooling").
/// Never fails; may make no progress.
pub fn skip_trivia() -> Parser<()> {
    Parser::new(|input, pos| {
        let mut current = pos;
        loop {
            let rem = remaining(input, current);
            if let Some(c) = rem.chars().next() {
                if matches!(c, ' ' | '\t' | '\r' | '\n') {
                    current = current.advance(&rem[..c.len_utf8()]);
                    continue;
                }
            }
            if rem.starts_with("//") {
                let mut end = 2;
                for c in rem[2..].chars() {
                    if c == '\n' {
                        break;
                    }
                    end += c.len_utf8();
                }
                current = current.advance(&rem[..end]);
                continue;
            }
            break;
        }
        ParseResult::ok((), pos, current)
    })
}

/// Wrap `p` so it first skips leading trivia — the "lexeme" shape
/// every token-level parser in this module shares.
pub fn token<T: 'static>(p: Parser<T>) -> Parser<T> {
    Parser::new(move |input, pos| match skip_trivia().parse(input, pos) {
        ParseResult::Success { next, .. } => p.parse(input, next),
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

fn regex_token(regex: &'static Lazy<Regex>, expected: &'static str) -> Parser<String> {
    token(Parser::new(move |input, pos| {
        let rem = remaining(input, pos);
        match regex.find(rem) {
            Some(m) if m.start() == 0 && m.end() > 0 => {
                let text = &rem[..m.end()];
                let next = pos.advance(text);
                ParseResult::ok(text.to_string(), pos, next)
            }
            _ => ParseResult::err(
                crate::error::ParseFailure::new(format!("expected {}", expected), pos)
                    .expected(expected),
            ),
        }
    }))
}

/// `[A-Za-z_][A-Za-z0-9_]*`.
pub fn identifier() -> Parser<String> {
    regex_token(&IDENTIFIER, "identifier")
}

/// `Identifier "." Identifier`, matched as a single token so no
/// whitespace can separate the module, the dot and the rule name.
pub fn qualified_identifier() -> Parser<(String, String)> {
    regex_token(&QUALIFIED_IDENTIFIER, "qualified identifier").map(|text| {
        let mut parts = text.splitn(2, '.');
        let module = parts.next().unwrap().to_string();
        let name = parts.next().unwrap().to_string();
        (module, name)
    })
}

/// An unsigned integer literal, used by bounded quantifiers (`{N,M}`).
pub fn integer() -> Parser<usize> {
    regex_token(&INTEGER, "integer").map(|text| text.parse().expect("regex guarantees digits"))
}

/// A fixed punctuation/keyword token, skipping leading trivia first.
pub fn sym(s: &'static str) -> Parser<String> {
    token(Parser::new(move |input, pos| {
        let rem = remaining(input, pos);
        if rem.starts_with(s) {
            let next = pos.advance(s);
            ParseResult::ok(s.to_string(), pos, next)
        } else {
            ParseResult::err(
                crate::error::ParseFailure::new(format!("expected {:?}", s), pos).expected(format!("{:?}", s)),
            )
        }
    }))
}

/// Decode one escape sequence immediately following a consumed `\`,
/// returning the produced character and how many source bytes (after
/// the backslash) it consumed. `extra` names characters this context
/// additionally allows escaping verbatim (character classes permit
/// `\] \[ \- \^` beyond the common set).
fn decode_escape(rest: &str, extra: &[char]) -> Result<(char, usize), String> {
    let mut chars = rest.chars();
    let first = chars.next();
    match first {
        Some('n') => Ok(('\n', 1)),
        Some('r') => Ok(('\r', 1)),
        Some('t') => Ok(('\t', 1)),
        Some('\\') => Ok(('\\', 1)),
        Some('"') => Ok(('"', 1)),
        Some('\'') => Ok(('\'', 1)),
        Some('0') => Ok(('\0', 1)),
        Some('x') => {
            let hex: String = rest.chars().skip(1).take(2).collect();
            if hex.len() == 2 {
                if let Ok(code) = u8::from_str_radix(&hex, 16) {
                    return Ok((code as char, 3));
                }
            }
            Err(format!("\\x{}", hex))
        }
        Some('u') => {
            let hex: String = rest.chars().skip(1).take(4).collect();
            if hex.len() == 4 {
                if let Ok(code) = u32::from_str_radix(&hex, 16) {
                    if let Some(c) = char::from_u32(code) {
                        return Ok((c, 5));
                    }
                }
            }
            Err(format!("\\u{}", hex))
        }
        Some(c) if extra.contains(&c) => Ok((c, 1)),
        Some(c) => Err(format!("\\{}", c)),
        None => Err("\\".into()),
    }
}

/// `"…"` or `'…'`, decoding escapes. Returns the decoded value and the
/// original quote character (spec §3: `StringLiteral { value, quote }`).
pub fn string_literal() -> Parser<(String, char)> {
    token(Parser::new(|input, pos| {
        let rem = remaining(input, pos);
        let quote = match rem.chars().next() {
            Some(c @ ('"' | '\'')) => c,
            _ => return ParseResult::err(crate::error::ParseFailure::new("expected string literal", pos).expected("string literal")),
        };
        let mut value = String::new();
        let mut idx = quote.len_utf8();
        loop {
            let tail = match rem.get(idx..) {
                Some(t) => t,
                None => return ParseResult::err(unclosed(pos, "string literal")),
            };
            match tail.chars().next() {
                None => return ParseResult::err(unclosed(pos, "string literal")),
                Some(c) if c == quote => {
                    idx += c.len_utf8();
                    break;
                }
                Some('\\') => {
                    let after = &tail[1..];
                    match decode_escape(after, &[]) {
                        Ok((decoded, consumed)) => {
                            value.push(decoded);
                            idx += 1 + byte_len_of_chars(after, consumed);
                        }
                        Err(sequence) => {
                            return ParseResult::err(
                                crate::error::ParseFailure::new(
                                    format!("invalid escape sequence {}", sequence),
                                    pos.advance(&rem[..idx]),
                                ),
                            )
                        }
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
        ParseResult::ok((value, quote), pos, next)
    }))
}

/// `[` optional `^`, one or more items, `]`. Each item is a raw
/// character or an escape, optionally followed by `-` and a second
/// character/escape forming an inclusive range.
pub fn character_class_literal() -> Parser<(Vec<CharRange>, bool)> {
    token(Parser::new(|input, pos| {
        let rem = remaining(input, pos);
        if !rem.starts_with('[') {
            return ParseResult::err(crate::error::ParseFailure::new("expected character class", pos).expected("'['"));
        }
        let mut idx = 1;
        let negated = rem[idx..].starts_with('^');
        if negated {
            idx += 1;
        }
        let mut ranges = Vec::new();
        loop {
            let tail = match rem.get(idx..) {
                Some(t) => t,
                None => return ParseResult::err(unclosed(pos, "character class")),
            };
            match tail.chars().next() {
                None => return ParseResult::err(unclosed(pos, "character class")),
                Some(']') => {
                    idx += 1;
                    break;
                }
                _ => {}
            }
            let (first, consumed) = match read_class_char(tail) {
                Ok(v) => v,
                Err(err) => {
                    return ParseResult::err(
                        crate::error::ParseFailure::new(format!("{}", err), pos.advance(&rem[..idx])),
                    )
                }
            };
            idx += consumed;

            let after_first = &rem[idx..];
            if after_first.starts_with('-') && !after_first[1..].starts_with(']') && !after_first.is_empty() {
                let after_dash = &after_first[1..];
                if !after_dash.is_empty() {
                    let (second, consumed2) = match read_class_char(after_dash) {
                        Ok(v) => v,
                        Err(err) => {
                            return ParseResult::err(crate::error::ParseFailure::new(
                                format!("{}", err),
                                pos.advance(&rem[..idx]),
                            ))
                        }
                    };
                    match CharRange::range(first, second) {
                        Ok(range) => {
                            ranges.push(range);
                            idx += 1 + consumed2;
                            continue;
                        }
                        Err(err) => {
                            return ParseResult::err(crate::error::ParseFailure::new(
                                format!("{}", err),
                                pos.advance(&rem[..idx]),
                            ))
                        }
                    }
                }
            }
            ranges.push(CharRange::single(first));
        }
        if ranges.is_empty() {
            return ParseResult::err(crate::error::ParseFailure::new(
                "character class must have at least one item",
                pos,
            ));
        }
        let consumed = &rem[..idx];
        let next = pos.advance(consumed);
        ParseResult::ok((ranges, negated), pos, next)
    }))
}

fn read_class_char(tail: &str) -> Result<(char, usize), String> {
    let mut chars = tail.chars();
    match chars.next() {
        Some('\\') => {
            let after = &tail[1..];
            decode_escape(after, &[']', '[', '-', '^'])
                .map(|(c, n)| (c, 1 + byte_len_of_chars(after, n)))
        }
        Some(c) => Ok((c, c.len_utf8())),
        None => Err("unclosed character class".to_string()),
    }
}

/// Byte length of the first `n_chars` characters of `s` — used to turn
/// the "character count consumed" result of [`decode_escape`] into a
/// byte offset for slicing.
fn byte_len_of_chars(s: &str, n_chars: usize) -> usize {
    s.char_indices()
        .nth(n_chars)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

fn unclosed(pos: Position, construct: &'static str) -> crate::error::ParseFailure {
    crate::error::ParseFailure::new(format!("unclosed {}", construct), pos)
}

/// Zero or more consecutive `///` lines, separated only by plain
/// whitespace (not other comments), collected and joined by `\n`. Used
/// immediately ahead of a `Rule` to populate [`crate::ast::Rule::doc`]
/// (SPEC_FULL §11).
pub fn doc_comment_block() -> Parser<Option<String>> {
    Parser::new(|input, pos| {
        let mut current = pos;
        let mut lines = Vec::new();
        loop {
            let mut candidate = current;
            loop {
                let rem = remaining(input, candidate);
                match rem.chars().next() {
                    Some(c) if matches!(c, ' ' | '\t' | '\r' | '\n') => {
                        candidate = candidate.advance(&rem[..c.len_utf8()]);
                    }
                    _ => break,
                }
            }
            let rem = remaining(input, candidate);
            if !rem.starts_with("///") {
                break;
            }
            let mut end = 3;
            for c in rem[3..].chars() {
                if c == '\n' {
                    break;
                }
                end += c.len_utf8();
            }
            let line_text = rem[3..end].trim();
            lines.push(line_text.to_string());
            let mut new_pos = candidate.advance(&rem[..end]);
            let after = remaining(input, new_pos);
            if after.starts_with('\n') {
                new_pos = new_pos.advance("\n");
            } else if after.starts_with("\r\n") {
                new_pos = new_pos.advance("\r\n");
            } else if after.starts_with('\r') {
                new_pos = new_pos.advance("\r");
            }
            current = new_pos;
        }
        if lines.is_empty() {
            ParseResult::ok(None, pos, pos)
        } else {
            ParseResult::ok(Some(lines.join("\n")), pos, current)
        }
    })
}

/// Succeeds only once trivia has been skipped through to the true end
/// of input; used to reject trailing garbage after a `Grammar` block.
pub fn eof() -> Parser<()> {
    Parser::new(|input, pos| match skip_trivia().parse(input, pos) {
        ParseResult::Success { next, .. } => {
            if next.offset >= input.len() {
                ParseResult::ok((), pos, next)
            } else {
                ParseResult::err(
                    crate::error::ParseFailure::new("expected end of input", next).expected("end of input"),
                )
            }
        }
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}
