use std::fmt::{Display, Formatter};

/// An immutable source position: a code-unit offset plus the one-based
/// line/column it corresponds to.
///
/// Positions are never mutated in place; [`Position::advance`] always
/// returns a new value. `offset` counts UTF-8 bytes, matching `literal`
/// and `character_class`, which also index the input as bytes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position at the start of an input: offset 0, line 1, column 1.
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Advance past `consumed`, scanning it for line breaks.
    ///
    /// `\n` and a lone `\r` each count as one line break; `\r\n` counts
    /// as a single break, not two.
    pub fn advance(&self, consumed: &str) -> Self {
        let mut line = self.line;
        let mut column = self.column;
        let mut chars = consumed.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    line += 1;
                    column = 1;
                }
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        Self {
            offset: self.offset + consumed.len(),
            line,
            column,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
