use crate::position::Position;
use std::fmt::{Display, Formatter};

/// The failure arm of [`crate::ParseResult`].
///
/// Carries the position at which the failure was detected along with
/// an optional `expected`/`found` pair, mirroring `lang_pt::ParseError`
/// but without a fixed `message` format — combinators fill in
/// `expected`/`found` and build `message` from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    pub pos: Position,
    pub expected: Option<String>,
    pub found: Option<String>,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>, pos: Position) -> Self {
        Self {
            message: message.into(),
            pos,
            expected: None,
            found: None,
        }
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// The `depth` used to break ties in `choice` — the offset reached.
    pub fn depth(&self) -> usize {
        self.pos.offset
    }
}

impl Display for ParseFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SyntaxError: {} at {}", self.message, self.pos)?;
        if let Some(expected) = &self.expected {
            write!(f, " (expected {})", expected)?;
        }
        if let Some(found) = &self.found {
            write!(f, " (found {})", found)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

/// Error kinds raised by the meta-grammar parser, the AST factories and
/// the generator. One enum covers the full table in spec §7; which
/// component can raise which variant is documented per-variant below.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TpegError {
    /// Raised by any combinator primitive: input did not match.
    UnexpectedInput { pos: Position, expected: String },
    /// Raised by `any`/`literal` when input is exhausted before a match.
    UnexpectedEndOfInput { pos: Position },
    /// Raised while lexing a string literal or character class.
    InvalidEscape { pos: Position, sequence: String },
    /// Raised when a string, character class, group or grammar block is
    /// missing its closing delimiter.
    UnclosedConstruct { pos: Position, construct: &'static str },
    /// Raised by the suffix parser: `max < min` or a non-numeric bound.
    InvalidQuantifier { pos: Position, message: String },
    /// Raised during grammar assembly: a rule name appears twice.
    DuplicateRule { name: String },
    /// Raised by an AST factory: empty `Sequence`/`Choice`, or an
    /// inverted `CharRange`.
    InvalidConstruction { message: String },
    /// Raised by the generator: an `Identifier` names no rule in this
    /// grammar. Qualified references are never checked this way.
    UnresolvedReference { name: String },
    /// Raised by the parser or the generator when a configured
    /// recursion depth bound is exceeded.
    RecursionLimit { limit: usize },
    /// Raised by `GeneratorConfig::from_options` for an unknown key.
    InvalidConfiguration { key: String },
}

impl Display for TpegError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TpegError::UnexpectedInput { pos, expected } => {
                write!(f, "unexpected input at {}: expected {}", pos, expected)
            }
            TpegError::UnexpectedEndOfInput { pos } => {
                write!(f, "unexpected end of input at {}", pos)
            }
            TpegError::InvalidEscape { pos, sequence } => {
                write!(f, "invalid escape sequence '{}' at {}", sequence, pos)
            }
            TpegError::UnclosedConstruct { pos, construct } => {
                write!(f, "unclosed {} starting at {}", construct, pos)
            }
            TpegError::InvalidQuantifier { pos, message } => {
                write!(f, "invalid quantifier at {}: {}", pos, message)
            }
            TpegError::DuplicateRule { name } => {
                write!(f, "duplicate rule '{}'", name)
            }
            TpegError::InvalidConstruction { message } => {
                write!(f, "invalid AST construction: {}", message)
            }
            TpegError::UnresolvedReference { name } => {
                write!(f, "unresolved reference to rule '{}'", name)
            }
            TpegError::RecursionLimit { limit } => {
                write!(f, "recursion limit of {} exceeded", limit)
            }
            TpegError::InvalidConfiguration { key } => {
                write!(f, "unknown configuration option '{}'", key)
            }
        }
    }
}

impl std::error::Error for TpegError {}

impl From<ParseFailure> for TpegError {
    fn from(failure: ParseFailure) -> Self {
        TpegError::UnexpectedInput {
            pos: failure.pos,
            expected: failure.expected.unwrap_or(failure.message),
        }
    }
}

/// Error returned by [`crate::generator::generate`]. A thin alias over
/// [`TpegError`] restricted (by convention, not by the type system) to
/// the generator-raised variants, the way `lang_pt::ImplementationError`
/// stands apart from `lang_pt::ParseError` for the same reason: the two
/// failure domains are detected at different phases.
pub type GeneratorError = TpegError;
