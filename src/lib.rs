//! tpeg is a Parsing Expression Grammar (PEG) toolchain: a meta-grammar
//! parser, a shared combinator engine, and a generator that lowers a
//! parsed grammar into source text for a target combinator library.
//!
//! # Overview
//!
//! Most parser generators ask you to author a grammar in a bespoke
//! DSL, run a separate code-generation step, and then treat the
//! generated parser as an opaque artifact. tpeg keeps the DSL (TPEG
//! source text, parsed by [`meta::parse_grammar`] into the [`ast`]
//! types) but builds the generator's own output, and every sample
//! grammar shipped in this crate, from the very same combinator
//! primitives in [`combinator`] that a hand-written parser would use
//! directly. There is no separate bootstrapping layer: the
//! meta-grammar parser is itself built from [`combinator::Parser`]
//! values exactly the way [`samples::arithmetic`] is.
//!
//! # Design
//!
//! - [`combinator`] (component B) — `Parser<T>` is a cheap-to-clone,
//!   pure function `(input, Position) -> ParseResult<T>`. Combinators
//!   like [`combinator::sequence`], [`combinator::choice`],
//!   [`combinator::star`] and [`combinator::plus`] build bigger
//!   parsers out of smaller ones; [`combinator::Forward`] lets mutually
//!   recursive rules refer to each other before either is fully built.
//! - [`ast`] (component C) — the [`ast::Expr`] sum type a grammar
//!   compiles down to, plus [`ast::Grammar`], [`ast::Rule`] and
//!   [`ast::Annotation`].
//! - [`meta`] (component D) — [`meta::parse_grammar`] turns TPEG source
//!   text into an [`ast::Grammar`], and [`meta::expr`] exposes the
//!   expression-grammar parser on its own for embedding a single
//!   pattern without the surrounding `grammar { ... }` block.
//! - [`generator`] (component E) — [`generator::generate`] walks a
//!   parsed [`ast::Grammar`] and renders one `pub fn` per rule,
//!   returning a [`generator::GeneratedCode`] of `{imports, exports,
//!   code}`. Behavior is tuned by [`generator::GeneratorConfig`].
//! - [`samples`] (component F) — arithmetic, CSV and JSON parsers
//!   written directly against [`combinator`], standing as the
//!   acceptance test for the combinator engine's contracts, plus a
//!   self-hosting demonstration in [`samples::generate_self_describing_grammar`].
//!
//! # Example
//!
//! ```
//! use tpeg::ast::{CharRange, Expr, Grammar, Rule};
//! use tpeg::generator::{generate, GeneratorConfig};
//!
//! let pattern = Expr::plus(
//!     Expr::character_class(vec![CharRange::range('0', '9').unwrap()], false).unwrap(),
//! );
//! let grammar = Grammar::new("Calculator", Vec::new(), vec![Rule::new("number", pattern)]);
//!
//! let generated = generate(&grammar, &GeneratorConfig::default()).unwrap();
//! assert!(generated.code.contains("pub fn number() -> Parser<Value>"));
//! assert_eq!(generated.exports, vec!["number".to_string()]);
//! ```
//!
//! Parsing TPEG source text directly:
//!
//! ```
//! use tpeg::meta::parse_grammar;
//!
//! let grammar = parse_grammar(
//!     r#"grammar Calculator {
//!         @version: "1.0"
//!         number = [0-9]+
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(grammar.name, "Calculator");
//! assert_eq!(grammar.annotation("version"), Some("1.0"));
//! ```
//!
//! # License
//! tpeg is provided under the MIT license. See [LICENSE](https://github.com/creative-forest/tpeg/blob/main/LICENSE).

pub mod ast;
pub mod combinator;
pub mod error;
pub mod generator;
pub mod meta;
pub mod position;
pub mod result;
pub mod samples;
pub mod util;

pub use combinator::Parser;
pub use error::{ParseFailure, TpegError};
pub use position::Position;
pub use result::ParseResult;
