use super::Parser;
use crate::position::Position;
use crate::result::ParseResult;
use crate::util::Trace;
use once_cell::unsync::OnceCell;
use std::rc::Rc;

/// A forward-declared parser slot, used to build mutually recursive
/// grammars without a cyclic ownership graph (Design Notes: "Use an
/// index-keyed environment ... resolved at build time"; here the
/// "index" is simply the `Rc<OnceCell<_>>` itself). Grounded on
/// `lang_pt::production::Union::init` / `set_symbols`, which separates
/// "declare this rule exists" from "here is what it matches" for
/// exactly the same reason.
///
/// Construct one per recursive rule, hand out [`Forward::parser`]
/// clones to every referencing site, then [`Forward::set`] it once the
/// real parser has been built. Parsing before `set` has been called is
/// a programmer error and panics, matching the teacher's
/// `debug_assert!`/`panic!` use for unmet build-time invariants.
///
/// A `Forward` is also this crate's one genuinely settable, per-instance
/// construct, so it is where [`Trace`] gets hung: [`Forward::set_log`]
/// attaches an optional label, and every parse made through
/// [`Forward::parser`] reports through it, the way the teacher's
/// `Union`/`NTHelper` productions report through their own assigned
/// `Log` label.
pub struct Forward<T> {
    cell: Rc<OnceCell<Parser<T>>>,
    debugger: Rc<OnceCell<Trace<&'static str>>>,
}

impl<T> Forward<T> {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(OnceCell::new()),
            debugger: Rc::new(OnceCell::new()),
        }
    }

    /// Assign the real parser. Panics if called twice for the same slot.
    pub fn set(&self, parser: Parser<T>) {
        if self.cell.set(parser).is_err() {
            panic!("Forward parser slot is already assigned.");
        }
    }

    /// Attach a trace label to this slot. Optional — a `Forward` never
    /// traced behaves exactly as before. Panics if called twice, the
    /// same one-time-assignment discipline as `set`.
    pub fn set_log(&self, trace: Trace<&'static str>) {
        if self.debugger.set(trace).is_err() {
            panic!("Forward trace label is already assigned.");
        }
    }

    /// A handle that, once `set` has been called, behaves exactly like
    /// the parser it was set to.
    pub fn parser(&self) -> Parser<T>
    where
        T: 'static,
    {
        let cell = self.cell.clone();
        let debugger = self.debugger.clone();
        Parser::new(move |input, pos| -> ParseResult<T> {
            let trace = debugger.get().copied().unwrap_or_default();
            trace.enter(pos);
            let result = cell
                .get()
                .expect("Forward parser used before being set.")
                .parse(input, pos);
            match &result {
                ParseResult::Success { current, next, .. } => trace.success(current, next),
                ParseResult::Failure(err) => trace.failure(&err.pos),
            }
            result
        })
    }
}

impl<T> Default for Forward<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Forward<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            debugger: self.debugger.clone(),
        }
    }
}
