use crate::ast::{CharRange, Expr, Grammar, Rule};
use crate::error::TpegError;
use crate::generator::{generate, GeneratorConfig};

fn calculator_grammar() -> Grammar {
    // spec §8 end-to-end scenario 3/5: `number = [0-9]+`.
    let pattern = Expr::plus(
        Expr::character_class(vec![CharRange::range('0', '9').unwrap()], false).unwrap(),
    );
    Grammar::new("Calculator", Vec::new(), vec![Rule::new("number", pattern)])
}

#[test]
fn generate_prefixes_rule_names_and_tracks_imports_exports() {
    let grammar = calculator_grammar();
    let config = GeneratorConfig {
        name_prefix: "calc_".to_string(),
        ..GeneratorConfig::default()
    };
    let generated = generate(&grammar, &config).expect("generation succeeds");

    assert!(generated.code.contains("pub fn calc_number() -> Parser<Value>"));
    assert!(generated.code.contains("plus("));
    assert!(generated.code.contains("character_class("));
    assert_eq!(generated.exports, vec!["number".to_string()]);
    assert!(generated.imports.contains(&"plus".to_string()));
    assert!(generated.imports.contains(&"character_class".to_string()));
}

#[test]
fn generate_omits_import_preamble_when_disabled() {
    let grammar = calculator_grammar();
    let config = GeneratorConfig {
        include_imports: false,
        ..GeneratorConfig::default()
    };
    let generated = generate(&grammar, &config).expect("generation succeeds");
    assert!(!generated.code.contains("use tpeg::combinator"));
}

#[test]
fn generate_rejects_unresolved_identifier() {
    let grammar = Grammar::new(
        "Broken",
        Vec::new(),
        vec![Rule::new("start", Expr::identifier("missing"))],
    );
    match generate(&grammar, &GeneratorConfig::default()) {
        Err(TpegError::UnresolvedReference { name }) => assert_eq!(name, "missing"),
        other => panic!("expected UnresolvedReference, got {:?}", other),
    }
}

#[test]
fn generate_allows_qualified_identifier_unconditionally() {
    let grammar = Grammar::new(
        "Host",
        Vec::new(),
        vec![Rule::new(
            "start",
            Expr::qualified_identifier("Other", "rule"),
        )],
    );
    let generated = generate(&grammar, &GeneratorConfig::default()).expect("generation succeeds");
    assert!(generated.code.contains("Other::rule()"));
}

#[test]
fn generate_fails_past_the_recursion_limit() {
    let mut pattern = Expr::string_literal("leaf", '"');
    for _ in 0..600 {
        pattern = Expr::group(pattern);
    }
    let grammar = Grammar::new("Deep", Vec::new(), vec![Rule::new("start", pattern)]);
    match generate(&grammar, &GeneratorConfig::default()) {
        Err(TpegError::RecursionLimit { .. }) => {}
        other => panic!("expected RecursionLimit, got {:?}", other),
    }
}

#[test]
fn from_options_rejects_unknown_key() {
    match GeneratorConfig::from_options(vec![("bogus".to_string(), "1".to_string())]) {
        Err(TpegError::InvalidConfiguration { key }) => assert_eq!(key, "bogus"),
        other => panic!("expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn from_options_applies_known_keys() {
    let config = GeneratorConfig::from_options(vec![
        ("namePrefix".to_string(), "p_".to_string()),
        ("includeImports".to_string(), "false".to_string()),
    ])
    .expect("valid options");
    assert_eq!(config.name_prefix, "p_");
    assert!(!config.include_imports);
    assert!(config.include_types);
}

#[test]
fn labeled_expression_becomes_a_comment_when_types_are_included() {
    let grammar = Grammar::new(
        "Labels",
        Vec::new(),
        vec![Rule::new(
            "start",
            Expr::labeled("digit", Expr::string_literal("x", '"')),
        )],
    );
    let generated = generate(&grammar, &GeneratorConfig::default()).expect("generation succeeds");
    assert!(generated.code.contains("/* label: digit */"));
}
