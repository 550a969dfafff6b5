//! The meta-grammar parser (spec §4.D, component D): parses TPEG source
//! text into the AST of component C, built from the combinator
//! primitives of component B exactly as the sample grammars (component
//! F) are — there is no separate "parser generator for the parser
//! generator" bootstrapping step.

mod expr;
mod grammar;
mod lexer;

#[cfg(test)]
mod __tests__;

pub use expr::expr;
pub use grammar::parse_grammar;
