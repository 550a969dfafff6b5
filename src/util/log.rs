use std::fmt::{Debug, Display, Formatter};

/// A leveled debug trace, the same shape as `lang_pt::util::Log`: a
/// bare presence check (`None`) plus three increasingly verbose levels.
/// No logging crate is pulled in for this — like the teacher, tracing
/// here is a `#[cfg(debug_assertions)]`-gated `println!`, never active
/// in a release build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace<T> {
    None,
    Entry(T),
    Success(T),
    Failure(T),
}

impl<T> Trace<T> {
    fn order(&self) -> u8 {
        match self {
            Trace::None => 0,
            Trace::Entry(_) => 1,
            Trace::Success(_) => 2,
            Trace::Failure(_) => 3,
        }
    }
}

impl<T: Display> Display for Trace<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Trace::None => Ok(()),
            Trace::Entry(s) | Trace::Success(s) | Trace::Failure(s) => write!(f, "{}", s),
        }
    }
}

impl Trace<&'static str> {
    /// Log entry into a labeled combinator or generator pass.
    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn enter(&self, pos: impl Debug) {
        #[cfg(debug_assertions)]
        if self.order() >= Trace::Entry("").order() {
            println!("[{}; enter] at {:?}", self, pos);
        }
    }

    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn success(&self, current: impl Debug, next: impl Debug) {
        #[cfg(debug_assertions)]
        if self.order() >= Trace::Success("").order() {
            println!("[{}; success] {:?} -> {:?}", self, current, next);
        }
    }

    #[cfg_attr(not(debug_assertions), allow(unused_variables))]
    pub fn failure(&self, pos: impl Debug) {
        #[cfg(debug_assertions)]
        if self.order() >= Trace::Failure("").order() {
            println!("[{}; failure] at {:?}", self, pos);
        }
    }
}

impl Default for Trace<&'static str> {
    fn default() -> Self {
        Trace::None
    }
}
