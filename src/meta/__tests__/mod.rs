use crate::ast::{CharRange, Expr};
use crate::error::TpegError;
use crate::result::ParseResult;

use super::grammar::parse_grammar;
use super::{expr, lexer};

#[test]
fn string_literal_parses_to_string_literal_node() {
    // spec §8 end-to-end scenario 1.
    match lexer::string_literal().parse_all("\"hello\"") {
        ParseResult::Success { value: (text, quote), .. } => {
            assert_eq!(text, "hello");
            assert_eq!(quote, '"');
        }
        ParseResult::Failure(err) => panic!("expected success, got {}", err),
    }
}

#[test]
fn character_class_parses_ranges_in_source_order() {
    // spec §8 end-to-end scenario 2.
    match lexer::character_class_literal().parse_all("[a-zA-Z0-9_]") {
        ParseResult::Success { value: (ranges, negated), .. } => {
            assert!(!negated);
            assert_eq!(
                ranges,
                vec![
                    CharRange::range('a', 'z').unwrap(),
                    CharRange::range('A', 'Z').unwrap(),
                    CharRange::range('0', '9').unwrap(),
                    CharRange::single('_'),
                ]
            );
        }
        ParseResult::Failure(err) => panic!("expected success, got {}", err),
    }
}

#[test]
fn choice_of_three_string_literals_preserves_source_order() {
    // spec §8 end-to-end scenario 6.
    match expr().parse_all("\"yes\" / \"no\" / \"maybe\"") {
        ParseResult::Success { value, .. } => match value {
            Expr::Choice { alternatives } => {
                assert_eq!(
                    alternatives,
                    vec![
                        Expr::string_literal("yes", '"'),
                        Expr::string_literal("no", '"'),
                        Expr::string_literal("maybe", '"'),
                    ]
                );
            }
            other => panic!("expected Choice, got {:?}", other),
        },
        ParseResult::Failure(err) => panic!("expected success, got {}", err),
    }
}

#[test]
fn grammar_block_with_annotation_parses_to_full_grammar() {
    // spec §8 end-to-end scenario 3.
    let source = "grammar Calculator { @version: \"1.0\"\n number = [0-9]+ }";
    let grammar = parse_grammar(source).expect("valid grammar");
    assert_eq!(grammar.name, "Calculator");
    assert_eq!(grammar.annotation("version"), Some("1.0"));
    let number = grammar.rule("number").expect("rule number");
    match &number.pattern {
        Expr::Plus { expression } => match expression.as_ref() {
            Expr::CharacterClass { ranges, negated } => {
                assert!(!negated);
                assert_eq!(ranges, &vec![CharRange::range('0', '9').unwrap()]);
            }
            other => panic!("expected CharacterClass, got {:?}", other),
        },
        other => panic!("expected Plus, got {:?}", other),
    }
}

#[test]
fn doc_comment_attaches_to_following_rule_only() {
    let source = "grammar Docs {\n  /// matches a digit\n  digit = [0-9]\n  letter = [a-z]\n}";
    let grammar = parse_grammar(source).expect("valid grammar");
    assert_eq!(
        grammar.rule("digit").unwrap().doc.as_deref(),
        Some("matches a digit")
    );
    assert_eq!(grammar.rule("letter").unwrap().doc, None);
}

#[test]
fn duplicate_rule_names_are_rejected() {
    let source = "grammar Dup { a = \"x\" a = \"y\" }";
    match parse_grammar(source) {
        Err(TpegError::DuplicateRule { name }) => assert_eq!(name, "a"),
        other => panic!("expected DuplicateRule, got {:?}", other),
    }
}

#[test]
fn trailing_garbage_after_closing_brace_is_rejected() {
    let source = "grammar G { a = \"x\" } garbage";
    assert!(parse_grammar(source).is_err());
}

#[test]
fn qualified_identifier_is_preferred_over_bare_identifier() {
    match expr().parse_all("Other.rule") {
        ParseResult::Success { value, .. } => {
            assert_eq!(value, Expr::qualified_identifier("Other", "rule"));
        }
        ParseResult::Failure(err) => panic!("expected success, got {}", err),
    }
}

#[test]
fn group_supports_recursive_nesting() {
    match expr().parse_all("((\"a\"))") {
        ParseResult::Success { value, .. } => {
            assert_eq!(
                value,
                Expr::group(Expr::group(Expr::string_literal("a", '"')))
            );
        }
        ParseResult::Failure(err) => panic!("expected success, got {}", err),
    }
}

#[test]
fn bounded_quantifier_rejects_max_less_than_min() {
    match expr().parse_all("\"a\"{3,1}") {
        ParseResult::Failure(_) => {}
        ParseResult::Success { value, .. } => panic!("expected failure, got {:?}", value),
    }
}

#[test]
fn labeled_expression_is_metadata_only() {
    match expr().parse_all("digit:[0-9]") {
        ParseResult::Success { value, .. } => match value {
            Expr::LabeledExpression { label, expression } => {
                assert_eq!(label, "digit");
                assert!(matches!(*expression, Expr::CharacterClass { .. }));
            }
            other => panic!("expected LabeledExpression, got {:?}", other),
        },
        ParseResult::Failure(err) => panic!("expected success, got {}", err),
    }
}
