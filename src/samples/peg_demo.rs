//! Self-hosting idempotence demonstration (SPEC_FULL §11): a grammar
//! description of an `identifier` rule, generated twice from the same
//! source text, to witness that `generate` is a pure function of its
//! inputs with no hidden ordering or naming nondeterminism.

use crate::error::TpegError;
use crate::generator::{generate, GeneratedCode, GeneratorConfig};
use crate::meta::parse_grammar;

/// A grammar describing the same identifier shape the meta-grammar's
/// own lexer accepts for rule names — chosen so the demonstration stays
/// legible without pulling in the full TPEG grammar.
pub const SELF_DESCRIBING_GRAMMAR: &str = r#"grammar PegDemo {
    @purpose: "self-hosting idempotence witness"
    identifier = [a-zA-Z_] [a-zA-Z0-9_]*
}"#;

/// Parses and generates [`SELF_DESCRIBING_GRAMMAR`] twice, independently,
/// returning both artifacts so a caller can compare them for equality.
pub fn generate_self_describing_grammar() -> Result<(GeneratedCode, GeneratedCode), TpegError> {
    let config = GeneratorConfig::default();

    let first_ast = parse_grammar(SELF_DESCRIBING_GRAMMAR)?;
    let first = generate(&first_ast, &config)?;

    let second_ast = parse_grammar(SELF_DESCRIBING_GRAMMAR)?;
    let second = generate(&second_ast, &config)?;

    Ok((first, second))
}
