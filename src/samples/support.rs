//! Whitespace/token helpers shared by the sample grammars (spec §4.F).
//! Each sample is an independent demonstration of component B, so this
//! is a small self-contained lexeme-wrapping helper rather than a
//! dependency on `crate::meta::lexer`'s private machinery, which is
//! only ever meant to back the meta-grammar parser itself.

use crate::ast::CharRange;
use crate::combinator::{character_class, literal, map, star, Parser};
use crate::result::ParseResult;

pub fn trivia() -> Parser<()> {
    map(
        star(character_class(
            vec![
                CharRange::single(' '),
                CharRange::single('\t'),
                CharRange::single('\n'),
                CharRange::single('\r'),
            ],
            false,
        )),
        |_| (),
    )
}

pub fn lexeme<T: 'static>(p: Parser<T>) -> Parser<T> {
    Parser::new(move |input, pos| match trivia().parse(input, pos) {
        ParseResult::Success { next, .. } => p.parse(input, next),
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

pub fn sym(s: &'static str) -> Parser<String> {
    lexeme(literal(s))
}
