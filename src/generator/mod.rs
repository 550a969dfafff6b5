//! The parser generator (spec §4.E, component E): lowers an AST
//! produced by the meta-grammar parser (component D) into source text
//! for a target combinator library.

mod codegen;
mod config;

#[cfg(test)]
mod __tests__;

pub use codegen::{generate, GeneratedCode};
pub use config::GeneratorConfig;
