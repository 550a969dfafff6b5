//! The expression grammar (spec §4.D): builds a `Parser<Expr>` for the
//! ordered-choice precedence chain
//!
//! ```text
//! Choice    = Sequence ( "/" Sequence )*
//! Sequence  = Prefixed ( Prefixed )*
//! Prefixed  = ("&" | "!")? Labeled
//! Labeled   = ( Identifier ":" )? Suffixed
//! Suffixed  = Primary ( "*" | "+" | "?" | "{" N ("," N?)? "}" )?
//! Primary   = Group | StringLiteral | CharacterClass | AnyChar
//!           | QualifiedIdentifier | Identifier
//! Group     = "(" Choice ")"
//! ```
//!
//! directly on top of the lexical layer, the same way `lang_pt`
//! assembles its `Concat`/`Union` productions from `Pattern`/`Union`
//! leaves rather than through a separate grammar-description format.
//! `Choice` and `Group` are mutually recursive, so the whole chain is
//! built around one [`Forward<Expr>`] slot standing in for `Choice`.

use crate::ast::Expr;
use crate::combinator::{choice, map, not_, optional, seq2, seq4, star, Forward, Parser};
use crate::error::ParseFailure;
use crate::meta::lexer::{character_class_literal, identifier, integer, qualified_identifier, string_literal, sym};
use crate::result::ParseResult;
use crate::util::DepthGuard;
use std::cell::RefCell;
use std::rc::Rc;

/// Builds a fresh `Parser<Expr>` for the whole expression chain. Called
/// once per [`crate::meta::grammar::parse_grammar`] invocation — parsers
/// close over `Rc`s, which are not `Send`, so a tree is built per call
/// rather than shared as a process-wide static (spec §5: independent
/// parses may run on separate threads with no coordination).
pub fn expr() -> Parser<Expr> {
    let forward: Forward<Expr> = Forward::new();
    let guard: Rc<RefCell<DepthGuard>> = Rc::new(RefCell::new(DepthGuard::default()));

    let primary = primary_parser(forward.clone(), guard);
    let suffixed = suffixed_parser(primary);
    let labeled = labeled_parser(suffixed);
    let prefixed = prefixed_parser(labeled);
    let sequence_expr = sequence_parser(prefixed);
    let choice_expr = choice_parser(sequence_expr);

    forward.set(choice_expr.clone());
    choice_expr
}

enum Suffix {
    Star,
    Plus,
    Optional,
    Bounded(usize, Option<usize>),
}

fn bounded_suffix() -> Parser<Suffix> {
    map(
        seq4(
            sym("{"),
            integer(),
            optional(seq2(sym(","), optional(integer()))),
            sym("}"),
        ),
        |(_, min, tail, _)| match tail {
            None => Suffix::Bounded(min, Some(min)),
            Some((_, None)) => Suffix::Bounded(min, None),
            Some((_, Some(max))) => Suffix::Bounded(min, Some(max)),
        },
    )
}

fn suffix_token() -> Parser<Suffix> {
    choice(vec![
        map(sym("*"), |_| Suffix::Star),
        map(sym("+"), |_| Suffix::Plus),
        map(sym("?"), |_| Suffix::Optional),
        bounded_suffix(),
    ])
}

/// Applies an optional trailing quantifier to `primary`. Bounded
/// quantifiers can fail semantically (`max < min`) after the syntax has
/// already matched, so this is hand-assembled rather than a plain
/// `map` over a `seq2` — the same reason `sequence_parser`/
/// `choice_parser` below are hand-assembled.
fn suffixed_parser(primary: Parser<Expr>) -> Parser<Expr> {
    let combined = seq2(primary, optional(suffix_token()));
    Parser::new(move |input, pos| match combined.parse(input, pos) {
        ParseResult::Success {
            value: (primary, suffix),
            current,
            next,
        } => match suffix {
            None => ParseResult::ok(primary, current, next),
            Some(Suffix::Star) => ParseResult::ok(Expr::star(primary), current, next),
            Some(Suffix::Plus) => ParseResult::ok(Expr::plus(primary), current, next),
            Some(Suffix::Optional) => ParseResult::ok(Expr::optional(primary), current, next),
            Some(Suffix::Bounded(min, max)) => match Expr::quantified(primary, min, max) {
                Ok(expr) => ParseResult::ok(expr, current, next),
                Err(err) => ParseResult::err(ParseFailure::new(format!("{}", err), next)),
            },
        },
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

/// `(Identifier ":")? Suffixed`. The optional label prefix is tried and,
/// on failure (no colon follows), simply abandoned — `optional` already
/// guarantees zero consumption in that case, so `Suffixed` re-parses the
/// identifier as an ordinary `Primary` with no extra lookahead needed.
fn labeled_parser(suffixed: Parser<Expr>) -> Parser<Expr> {
    let label_prefix = optional(seq2(identifier(), sym(":")));
    map(seq2(label_prefix, suffixed), |(label, expr)| match label {
        Some((name, _)) => Expr::labeled(name, expr),
        None => expr,
    })
}

/// `("&" | "!")? Labeled`.
fn prefixed_parser(labeled: Parser<Expr>) -> Parser<Expr> {
    let prefix = optional(choice(vec![
        map(sym("&"), |_| true),
        map(sym("!"), |_| false),
    ]));
    map(seq2(prefix, labeled), |(prefix, expr)| match prefix {
        Some(true) => Expr::positive_lookahead(expr),
        Some(false) => Expr::negative_lookahead(expr),
        None => expr,
    })
}

/// `Prefixed (Prefixed)*`, collapsed through [`Expr::sequence`]. Each
/// repeated `Prefixed` is gated by a negative lookahead for `Identifier
/// "="` — the only place that shape appears in TPEG source is the start
/// of the next `Rule` (spec §4.D grammar block), so without the guard a
/// trailing sequence in one rule's pattern reparses the next rule's name
/// as a bare `Identifier` reference and the grammar parse stalls on the
/// orphaned `"="`.
fn sequence_parser(prefixed: Parser<Expr>) -> Parser<Expr> {
    let not_rule_start = not_(seq2(identifier(), sym("=")));
    let guarded_prefixed = Parser::new({
        let prefixed = prefixed.clone();
        move |input, pos| match not_rule_start.parse(input, pos) {
            ParseResult::Success { .. } => prefixed.parse(input, pos),
            ParseResult::Failure(err) => ParseResult::Failure(err),
        }
    });
    let rest = star(guarded_prefixed);
    let combined = seq2(prefixed, rest);
    Parser::new(move |input, pos| match combined.parse(input, pos) {
        ParseResult::Success {
            value: (first, mut rest),
            current,
            next,
        } => {
            let mut elements = vec![first];
            elements.append(&mut rest);
            match Expr::sequence(elements) {
                Ok(expr) => ParseResult::ok(expr, current, next),
                Err(err) => ParseResult::err(ParseFailure::new(format!("{}", err), pos)),
            }
        }
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

/// `Sequence ("/" Sequence)*`, collapsed through [`Expr::choice`].
fn choice_parser(sequence_expr: Parser<Expr>) -> Parser<Expr> {
    let alternative = Parser::new({
        let sequence_expr = sequence_expr.clone();
        move |input, pos| match sym("/").parse(input, pos) {
            ParseResult::Success { next, .. } => sequence_expr.parse(input, next),
            ParseResult::Failure(err) => ParseResult::Failure(err),
        }
    });
    let combined = seq2(sequence_expr, star(alternative));
    Parser::new(move |input, pos| match combined.parse(input, pos) {
        ParseResult::Success {
            value: (first, mut rest),
            current,
            next,
        } => {
            let mut alternatives = vec![first];
            alternatives.append(&mut rest);
            match Expr::choice(alternatives) {
                Ok(expr) => ParseResult::ok(expr, current, next),
                Err(err) => ParseResult::err(ParseFailure::new(format!("{}", err), pos)),
            }
        }
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

/// `"(" Choice ")"`, guarded by a shared recursion-depth counter
/// (SPEC_FULL §11: the one required piece of infrastructure spec.md §5
/// calls out by name). The guard lives in an `Rc<RefCell<_>>` rather
/// than being threaded through every `Parser<T>`'s `(input, pos)`
/// signature, since `Group` is the only construct that can recurse.
fn group_parser(forward: Forward<Expr>, guard: Rc<RefCell<DepthGuard>>) -> Parser<Expr> {
    let inner = forward.parser();
    Parser::new(move |input, pos| match sym("(").parse(input, pos) {
        ParseResult::Success {
            next: after_open, ..
        } => {
            let next_guard = match guard.borrow().enter() {
                Ok(g) => g,
                Err(limit) => {
                    return ParseResult::err(
                        ParseFailure::new(
                            format!("recursion limit of {} exceeded", limit),
                            after_open,
                        )
                        .expected("less deeply nested expression"),
                    )
                }
            };
            let previous = std::mem::replace(&mut *guard.borrow_mut(), next_guard);
            let result = inner.parse(input, after_open);
            *guard.borrow_mut() = previous;
            match result {
                ParseResult::Success {
                    value,
                    next: after_expr,
                    ..
                } => match sym(")").parse(input, after_expr) {
                    ParseResult::Success { next, .. } => {
                        ParseResult::ok(Expr::group(value), pos, next)
                    }
                    ParseResult::Failure(err) => ParseResult::Failure(err),
                },
                ParseResult::Failure(err) => ParseResult::Failure(err),
            }
        }
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

/// `Group | StringLiteral | CharacterClass | AnyChar | QualifiedIdentifier
/// | Identifier`. `QualifiedIdentifier` must be tried before `Identifier`:
/// both start with the same `[A-Za-z_][A-Za-z0-9_]*` prefix, and trying
/// the shorter alternative first would consume only the module half of
/// `Module.rule` and leave the `.rule` tail unexplained.
fn primary_parser(forward: Forward<Expr>, guard: Rc<RefCell<DepthGuard>>) -> Parser<Expr> {
    choice(vec![
        group_parser(forward, guard),
        map(string_literal(), |(value, quote)| {
            Expr::string_literal(value, quote)
        }),
        character_class_expr(),
        map(sym("."), |_| Expr::any_char()),
        map(qualified_identifier(), |(module, name)| {
            Expr::qualified_identifier(module, name)
        }),
        map(identifier(), Expr::identifier),
    ])
}

fn character_class_expr() -> Parser<Expr> {
    let inner = character_class_literal();
    Parser::new(move |input, pos| match inner.parse(input, pos) {
        ParseResult::Success {
            value: (ranges, negated),
            current,
            next,
        } => match Expr::character_class(ranges, negated) {
            Ok(expr) => ParseResult::ok(expr, current, next),
            Err(err) => ParseResult::err(ParseFailure::new(format!("{}", err), pos)),
        },
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}
