use crate::ast::CharRange;
use crate::combinator::{
    and_, any, character_class, choice, literal, map, not_, optional, plus, sequence, star, Forward,
};
use crate::position::Position;
use crate::result::ParseResult;
use crate::util::Trace;

fn succeeded<T>(result: &ParseResult<T>) -> bool {
    result.is_success()
}

#[test]
fn literal_matches_prefix_and_advances() {
    let p = literal("hello");
    match p.parse_all("hello world") {
        ParseResult::Success { value, next, .. } => {
            assert_eq!(value, "hello");
            assert_eq!(next.offset, 5);
        }
        ParseResult::Failure(_) => panic!("expected success"),
    }
}

#[test]
fn literal_fails_on_mismatch() {
    let p = literal("hello");
    assert!(!succeeded(&p.parse_all("goodbye")));
}

#[test]
fn any_fails_at_end_of_input() {
    let p = any();
    assert!(!succeeded(&p.parse_all("")));
}

#[test]
fn character_class_matches_ranges_in_order() {
    let p = character_class(
        vec![
            CharRange::range('a', 'z').unwrap(),
            CharRange::range('A', 'Z').unwrap(),
            CharRange::range('0', '9').unwrap(),
            CharRange::single('_'),
        ],
        false,
    );
    for s in ["a", "Z", "5", "_"] {
        assert!(succeeded(&p.parse_all(s)), "{} should match", s);
    }
    assert!(!succeeded(&p.parse_all("!")));
}

#[test]
fn character_class_single_range_is_exact() {
    let p = character_class(vec![CharRange::range('a', 'a').unwrap()], false);
    assert!(succeeded(&p.parse_all("a")));
    assert!(!succeeded(&p.parse_all("b")));
}

#[test]
fn negated_class_fails_at_end_of_input() {
    let p = character_class(vec![CharRange::single('a')], true);
    assert!(!succeeded(&p.parse_all("")));
}

#[test]
fn sequence_fails_without_partial_success() {
    let p = sequence(vec![literal("a"), literal("b")]);
    match p.parse_all("ac") {
        ParseResult::Failure(err) => assert_eq!(err.pos.offset, 1),
        _ => panic!("expected failure"),
    }
}

#[test]
fn choice_returns_deepest_error_on_total_failure() {
    // Alternatives built from `sequence` so they fail at different
    // depths: "aa"/"ab" both consume the leading 'a' before failing,
    // while "x" fails immediately.
    let alt_aa = sequence(vec![literal("a"), literal("a")]);
    let alt_ab = sequence(vec![literal("a"), literal("b")]);
    let alt_x = sequence(vec![literal("x")]);
    let p = choice(vec![alt_aa, alt_ab, alt_x]);
    match p.parse_all("ac") {
        ParseResult::Failure(err) => {
            // "aa" and "ab" both fail at offset 1 (after matching 'a'); "x" fails at 0.
            assert_eq!(err.pos.offset, 1);
        }
        _ => panic!("expected failure"),
    }
}

#[test]
fn choice_prefers_leftmost_alternative_on_tie() {
    let p = choice(vec![literal("yes"), literal("no"), literal("maybe")]);
    match p.parse_all("no") {
        ParseResult::Success { value, .. } => assert_eq!(value, "no"),
        _ => panic!("expected success"),
    }
    match p.parse_all("???") {
        ParseResult::Failure(err) => {
            assert_eq!(err.expected.as_deref(), Some("\"yes\""));
        }
        _ => panic!("expected failure"),
    }
}

#[test]
fn star_on_empty_input_succeeds_with_empty_list() {
    let p = star(literal("a"));
    match p.parse_all("") {
        ParseResult::Success { value, current, next } => {
            assert!(value.is_empty());
            assert_eq!(current, next);
        }
        _ => panic!("expected success"),
    }
}

#[test]
fn star_terminates_on_nullable_child() {
    // optional("a") never fails, so naively looping would never stop;
    // star must detect the zero-consumption iteration and halt.
    let p = star(optional(literal("a")));
    match p.parse_all("aaab") {
        ParseResult::Success { value, next, .. } => {
            assert_eq!(value.len(), 3);
            assert_eq!(next.offset, 3);
        }
        _ => panic!("expected success"),
    }
}

#[test]
fn plus_requires_at_least_one_match() {
    let p = plus(literal("a"));
    assert!(!succeeded(&p.parse_all("")));
    match p.parse_all("aaa") {
        ParseResult::Success { value, .. } => assert_eq!(value.len(), 3),
        _ => panic!("expected success"),
    }
}

#[test]
fn optional_never_fails() {
    let p = optional(literal("a"));
    match p.parse_all("b") {
        ParseResult::Success { value, current, next } => {
            assert_eq!(value, None);
            assert_eq!(current, next);
        }
        _ => panic!("expected success"),
    }
}

#[test]
fn and_does_not_consume_input() {
    let p = and_(literal("abc"));
    match p.parse_all("abc") {
        ParseResult::Success { next, .. } => assert_eq!(next.offset, 0),
        _ => panic!("expected success"),
    }
}

#[test]
fn not_succeeds_only_when_child_fails_and_consumes_nothing() {
    let p = not_(literal("abc"));
    assert!(!succeeded(&p.parse_all("abc")));
    match p.parse_all("xyz") {
        ParseResult::Success { next, .. } => assert_eq!(next.offset, 0),
        _ => panic!("expected success"),
    }
}

#[test]
fn map_transforms_success_and_preserves_failure() {
    let p = map(literal("42"), |s: String| s.parse::<i64>().unwrap());
    match p.parse_all("42") {
        ParseResult::Success { value, .. } => assert_eq!(value, 42),
        _ => panic!("expected success"),
    }
    assert!(!succeeded(&p.parse_all("xx")));
}

#[test]
fn forward_supports_mutual_recursion() {
    // balanced parens: Paren = "(" Paren ")" | "".
    let paren: Forward<Vec<String>> = Forward::new();
    let inner = paren.parser();
    let body = choice(vec![
        map(
            sequence(vec![literal("("), inner.map(|v| v.join("")), literal(")")]),
            |parts| vec![parts.join("")],
        ),
        map(literal(""), |_| Vec::new()),
    ]);
    paren.set(body);

    let p = paren.parser();
    assert!(succeeded(&p.parse_all("((()))")));
    match p.parse_all("((()))") {
        ParseResult::Success { next, .. } => assert_eq!(next.offset, 6),
        _ => panic!("expected success"),
    }
}

#[test]
fn forward_set_log_attaches_a_trace_label_without_changing_parse_result() {
    let p: Forward<String> = Forward::new();
    p.set_log(Trace::Failure("p"));
    p.set(literal("ok"));
    let parser = p.parser();
    match parser.parse_all("ok") {
        ParseResult::Success { value, .. } => assert_eq!(value, "ok"),
        _ => panic!("expected success"),
    }
}

#[test]
#[should_panic(expected = "trace label")]
fn forward_set_log_twice_panics() {
    let p: Forward<String> = Forward::new();
    p.set_log(Trace::None);
    p.set_log(Trace::None);
}

#[test]
fn position_advance_tracks_line_and_column_across_crlf() {
    let start = Position::start();
    let end = start.advance("ab\r\ncd\ref\ngh");
    assert_eq!(end.line, 4);
}
