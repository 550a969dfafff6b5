//! Ambient support utilities shared by the combinator engine, the
//! meta-grammar parser and the generator: leveled debug tracing and a
//! recursion-depth guard.

mod log;

pub use log::Trace;

/// A depth counter threaded through recursive descent and the
/// generator's AST walk (spec §5: "Implementations should offer an
/// explicit depth bound and return a `RecursionLimit` failure rather
/// than overflow.").
#[derive(Debug, Clone, Copy)]
pub struct DepthGuard {
    limit: usize,
    depth: usize,
}

impl DepthGuard {
    pub fn new(limit: usize) -> Self {
        Self { limit, depth: 0 }
    }

    /// Enter one more level of recursion, failing once `limit` is
    /// exceeded.
    pub fn enter(&self) -> Result<Self, usize> {
        let depth = self.depth + 1;
        if depth > self.limit {
            Err(self.limit)
        } else {
            Ok(Self {
                limit: self.limit,
                depth,
            })
        }
    }
}

impl Default for DepthGuard {
    /// A conservative default, generous enough for hand-written
    /// grammars while still catching a runaway recursive reference
    /// well before the native call stack would overflow.
    fn default() -> Self {
        Self::new(512)
    }
}
