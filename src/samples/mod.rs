//! Sample grammars (spec §4.F, component F): small, independent, hand
//! written parsers built directly from the combinator primitives in
//! [`crate::combinator`]. Their implementation is itself the acceptance
//! test for (B)'s contracts, and `arithmetic::evaluate` backs the
//! end-to-end scenario in spec §8.

mod arithmetic;
mod csv;
mod json;
mod peg_demo;
mod support;

#[cfg(test)]
mod __tests__;

pub use arithmetic::{arithmetic, evaluate};
pub use csv::{csv, parse_csv};
pub use json::{json, parse_json, JsonValue};
pub use peg_demo::{generate_self_describing_grammar, SELF_DESCRIBING_GRAMMAR};
