use super::{arithmetic, csv, json, peg_demo};

#[test]
fn arithmetic_evaluates_operator_precedence() {
    // spec §8 end-to-end scenario 4.
    assert_eq!(arithmetic::evaluate("1 + 2 * 3").unwrap(), 7);
}

#[test]
fn arithmetic_honors_parentheses() {
    assert_eq!(arithmetic::evaluate("(1 + 2) * 3").unwrap(), 9);
}

#[test]
fn arithmetic_rejects_trailing_garbage() {
    assert!(arithmetic::evaluate("1 + 2)").is_err());
}

#[test]
fn csv_parses_quoted_field_with_escaped_quote() {
    let rows = csv::parse_csv(
        r#"a,"b,c","say ""hi"""
d,e,f"#,
    )
    .unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["a".to_string(), "b,c".to_string(), "say \"hi\"".to_string()],
            vec!["d".to_string(), "e".to_string(), "f".to_string()],
        ]
    );
}

#[test]
fn csv_rejects_unclosed_quoted_field() {
    assert!(csv::parse_csv("a,\"unterminated").is_err());
}

#[test]
fn json_parses_nested_object_and_array() {
    let value = json::parse_json(
        r#"{ "name": "tpeg", "tags": ["peg", "parser"], "version": 1.0, "stable": true, "notes": null }"#,
    )
    .unwrap();

    match value {
        json::JsonValue::Object(members) => {
            assert_eq!(members.len(), 5);
            assert_eq!(members[0].0, "name");
            assert_eq!(members[0].1, json::JsonValue::String("tpeg".to_string()));
            match &members[1].1 {
                json::JsonValue::Array(items) => assert_eq!(items.len(), 2),
                other => panic!("expected array, got {:?}", other),
            }
            assert_eq!(members[2].1, json::JsonValue::Number(1.0));
            assert_eq!(members[3].1, json::JsonValue::Bool(true));
            assert_eq!(members[4].1, json::JsonValue::Null);
        }
        other => panic!("expected object, got {:?}", other),
    }
}

#[test]
fn json_parses_empty_array_and_object() {
    assert_eq!(
        json::parse_json("[]").unwrap(),
        json::JsonValue::Array(Vec::new())
    );
    assert_eq!(
        json::parse_json("{}").unwrap(),
        json::JsonValue::Object(Vec::new())
    );
}

#[test]
fn json_decodes_string_escapes() {
    let value = json::parse_json(r#""a\nbA""#).unwrap();
    assert_eq!(value, json::JsonValue::String("a\nbA".to_string()));
}

#[test]
fn peg_demo_generation_is_idempotent() {
    // spec §8 invariant 6 / SPEC_FULL §11: generating twice from the
    // same source produces byte-identical artifacts.
    let (first, second) = peg_demo::generate_self_describing_grammar().unwrap();
    assert_eq!(first, second);
}
