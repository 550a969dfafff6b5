//! Arithmetic sample grammar (spec §4.F): `Expr -> Term -> Factor` with
//! left-associative folding performed by `map`. This sample is itself
//! the acceptance test for `sequence`/`choice`/`star`/`plus`/
//! `character_class` (spec §4.F: "Their implementation is the
//! acceptance test for (B)'s contracts").

use super::support::sym;
use crate::ast::CharRange;
use crate::combinator::{character_class, choice, map, plus, seq2, seq3, star, Forward, Parser};
use crate::error::ParseFailure;

fn number() -> Parser<i64> {
    let digit = character_class(vec![CharRange::range('0', '9').unwrap()], false);
    super::support::lexeme(map(plus(digit), |digits| {
        digits
            .into_iter()
            .collect::<String>()
            .parse()
            .expect("plus guarantees at least one ASCII digit")
    }))
}

enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

fn fold(first: i64, rest: Vec<(Op, i64)>) -> i64 {
    rest.into_iter().fold(first, |acc, (op, value)| match op {
        Op::Add => acc + value,
        Op::Sub => acc - value,
        Op::Mul => acc * value,
        Op::Div => acc / value,
    })
}

/// Builds a fresh parser evaluating an arithmetic expression to its
/// `i64` value (spec §8 end-to-end scenario 4: `"1 + 2 * 3"` → `7`).
pub fn arithmetic() -> Parser<i64> {
    let expr_forward: Forward<i64> = Forward::new();

    let paren = map(
        seq3(sym("("), expr_forward.parser(), sym(")")),
        |(_, value, _)| value,
    );
    let factor = choice(vec![paren, number()]);

    let term_op = choice(vec![map(sym("*"), |_| Op::Mul), map(sym("/"), |_| Op::Div)]);
    let term_tail = seq2(term_op, factor.clone());
    let term = map(seq2(factor, star(term_tail)), |(first, rest)| {
        fold(first, rest)
    });

    let expr_op = choice(vec![map(sym("+"), |_| Op::Add), map(sym("-"), |_| Op::Sub)]);
    let expr_tail = seq2(expr_op, term.clone());
    let expr = map(seq2(term, star(expr_tail)), |(first, rest)| {
        fold(first, rest)
    });

    expr_forward.set(expr.clone());
    expr
}

/// Parses and evaluates `source`, requiring the whole (trivia-trimmed)
/// input to be consumed.
pub fn evaluate(source: &str) -> Result<i64, ParseFailure> {
    map(
        seq2(arithmetic(), super::support::trivia()),
        |(value, _)| value,
    )
    .parse_all(source)
    .into_result()
}
