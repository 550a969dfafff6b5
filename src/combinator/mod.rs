//! Combinator primitives (spec §4.B, component B): pure functions that
//! build composite parsers from simpler ones.
//!
//! `Parser<T>` is a first-class value closing over its children —
//! Design Notes option (a). A trait-object tree keyed by a single
//! `IProduction`-style interface (the teacher's shape) was considered,
//! but the combinator-as-closure shape composes across the several
//! unrelated output types the sample grammars need (`i64`, `String`,
//! JSON values, `Expr`) without a shared node enum, which an
//! `IProduction`-style trait object would have forced.

mod forward;
mod primitives;
mod tuple;

#[cfg(test)]
mod __tests__;

pub use forward::Forward;
pub use tuple::{seq2, seq3, seq4};

use crate::error::ParseFailure;
use crate::position::Position;
use crate::result::ParseResult;
use std::rc::Rc;

/// A parser is a pure function `(input, pos) -> ParseResult<T>`,
/// wrapped so it can be cloned and stored in data structures (rule
/// tables, `Vec<Parser<T>>` for `choice`/`sequence`, …). Clone is cheap
/// — it bumps an `Rc` refcount, never deep-copies the closure.
pub struct Parser<T> {
    run: Rc<dyn Fn(&str, Position) -> ParseResult<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: self.run.clone(),
        }
    }
}

impl<T> Parser<T> {
    pub fn new(f: impl Fn(&str, Position) -> ParseResult<T> + 'static) -> Self {
        Self { run: Rc::new(f) }
    }

    pub fn parse(&self, input: &str, pos: Position) -> ParseResult<T> {
        (self.run)(input, pos)
    }

    /// Run from the start of `input`. A convenience used by hosts that
    /// never thread positions manually.
    pub fn parse_all(&self, input: &str) -> ParseResult<T> {
        self.parse(input, Position::start())
    }

    /// Applies `f` to the value of a successful parse; preserves
    /// failure verbatim (spec §4.B `map`).
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U>
    where
        T: 'static,
    {
        map(self, f)
    }
}

pub use primitives::{
    and_, any, character_class, choice, literal, map, not_, optional, plus, quantified, sequence,
    star,
};

/// The remaining slice of `input` starting at `pos.offset`, or an
/// empty slice past the end. Every primitive indexes through this
/// helper so the "code unit = UTF-8 byte" choice (spec Design Notes)
/// lives in exactly one place.
pub(crate) fn remaining<'a>(input: &'a str, pos: Position) -> &'a str {
    if pos.offset >= input.len() {
        ""
    } else {
        &input[pos.offset..]
    }
}

pub(crate) fn unexpected_end(pos: Position) -> ParseFailure {
    ParseFailure::new("unexpected end of input", pos)
}
