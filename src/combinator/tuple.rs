use super::Parser;
use crate::result::ParseResult;

/// Heterogeneous-typed pairing, for the common case where `sequence`'s
/// homogeneous `Vec<T>` is the wrong shape — e.g. a CSV field followed
/// by a separator of a different type. Built from the same
/// left-to-right, fail-fast contract as [`super::sequence`]; offered
/// as `seq2`/`seq3`/`seq4` rather than a variadic macro since the
/// sample grammars (component F) never need more than four fields at
/// a single concatenation site.
pub fn seq2<A: 'static, B: 'static>(pa: Parser<A>, pb: Parser<B>) -> Parser<(A, B)> {
    Parser::new(move |input, pos| match pa.parse(input, pos) {
        ParseResult::Success {
            value: a,
            next: mid,
            ..
        } => match pb.parse(input, mid) {
            ParseResult::Success {
                value: b, next, ..
            } => ParseResult::ok((a, b), pos, next),
            ParseResult::Failure(err) => ParseResult::Failure(err),
        },
        ParseResult::Failure(err) => ParseResult::Failure(err),
    })
}

pub fn seq3<A: 'static, B: 'static, C: 'static>(
    pa: Parser<A>,
    pb: Parser<B>,
    pc: Parser<C>,
) -> Parser<(A, B, C)> {
    seq2(seq2(pa, pb), pc).map(|((a, b), c)| (a, b, c))
}

pub fn seq4<A: 'static, B: 'static, C: 'static, D: 'static>(
    pa: Parser<A>,
    pb: Parser<B>,
    pc: Parser<C>,
    pd: Parser<D>,
) -> Parser<(A, B, C, D)> {
    seq2(seq3(pa, pb, pc), pd).map(|((a, b, c), d)| (a, b, c, d))
}
