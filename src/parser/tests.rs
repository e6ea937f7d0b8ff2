#[cfg(test)]
use super::*;

#[cfg(test)]
fn raw(text: &str) -> Vec<Layer> {
    let options = ParseOptions {
        preprocess: false,
        ..ParseOptions::default()
    };
    parse_with(text, &options).expect("Failed to parse")
}

#[cfg(test)]
fn value_of<'a>(layer: &'a Layer, key: &str) -> Option<&'a str> {
    layer.get(key).and_then(Node::value)
}

#[test]
fn test_parser_basic_layer() {
    let layers = parse("A:1;B:2;").expect("Failed to parse");
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].keys().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(value_of(&layers[0], "A"), Some("1"));
    assert_eq!(value_of(&layers[0], "B"), Some("2"));
}

#[test]
fn test_duplicate_key_starts_new_layer() {
    let layers = parse("A:1;A:2;").expect("Failed to parse");
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].len(), 1);
    assert_eq!(layers[1].len(), 1);
    assert_eq!(value_of(&layers[0], "A"), Some("1"));
    assert_eq!(value_of(&layers[1], "A"), Some("2"));
}

#[test]
fn test_new_layer_collects_following_keys() {
    let layers = raw("A:1;B:2;A:3;B:4;C:5;");
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[1].keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn test_comment_stripping() {
    let layers = parse("A:1; // comment\nB:2;").expect("Failed to parse");
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].len(), 2);

    let layers = parse("A:1;//x\nB:2;").expect("Failed to parse");
    assert_eq!(layers.len(), 1);
    assert_eq!(value_of(&layers[0], "A"), Some("1"));
    assert_eq!(value_of(&layers[0], "B"), Some("2"));
}

#[test]
fn test_comment_at_end_of_input() {
    let layers = raw("A:1;// trailing");
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].len(), 1);
}

#[test]
fn test_comment_inside_value_ends_value_text() {
    let layers = raw("A:1// note\n;");
    assert_eq!(value_of(&layers[0], "A"), Some("1"));
}

#[test]
fn test_lone_slash_is_not_a_comment() {
    let layers = parse("A:1/not-a-comment:2;").expect("Failed to parse");
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].len(), 1);
    assert_eq!(value_of(&layers[0], "A"), Some("1/not-a-comment:2"));
}

#[test]
fn test_nesting() {
    let layers = parse("Outer{Inner:5;}").expect("Failed to parse");
    assert_eq!(layers.len(), 1);

    let outer = layers[0].get("Outer").expect("Outer missing");
    assert_eq!(outer.value(), None);
    assert_eq!(outer.layer_count(), 1);
    assert_eq!(value_of(&outer.layers()[0], "Inner"), Some("5"));
}

#[test]
fn test_value_and_children() {
    let layers = raw("Weapon:Sword \t\n{Damage:10;}");
    let weapon = layers[0].get("Weapon").expect("Weapon missing");
    assert_eq!(weapon.value(), Some("Sword"));
    assert_eq!(weapon.get("Damage").and_then(Node::value), Some("10"));
}

#[test]
fn test_whitespace_discarded_in_key_kept_in_value() {
    let layers = raw("  My Key :  spaced\tvalue ;");
    let node = layers[0].get("MyKey").expect("key whitespace should be dropped");
    assert_eq!(node.key(), Some("MyKey"));
    assert_eq!(node.value(), Some("  spaced\tvalue "));
}

#[test]
fn test_colon_only_separates_once() {
    let layers = raw("Time:12:30:00;");
    assert_eq!(value_of(&layers[0], "Time"), Some("12:30:00"));
}

#[test]
fn test_key_without_value() {
    let layers = raw("Flag;Other:;");
    let flag = layers[0].get("Flag").expect("Flag missing");
    assert_eq!(flag.value(), None);
    assert_eq!(value_of(&layers[0], "Other"), Some(""));
}

#[test]
fn test_stray_semicolon_yields_empty_key() {
    let layers = raw(";");
    assert_eq!(layers.len(), 1);
    let node = layers[0].get("").expect("empty key node");
    assert_eq!(node.key(), Some(""));
}

#[test]
fn test_escape_applies_to_one_character() {
    let layers = raw(r"A:x\;y;B:2;");
    assert_eq!(layers[0].len(), 2);
    assert_eq!(value_of(&layers[0], "A"), Some("x;y"));
    assert_eq!(value_of(&layers[0], "B"), Some("2"));
}

#[test]
fn test_escaped_braces_comment_and_backslash() {
    let layers = raw(r"A:\{\}\//\\;");
    assert_eq!(value_of(&layers[0], "A"), Some(r"{}//\"));
}

#[test]
fn test_escaped_characters_in_key() {
    let layers = raw(r"a\ b\:c:1;");
    assert_eq!(value_of(&layers[0], "a b:c"), Some("1"));
}

#[test]
fn test_escaped_whitespace_before_block_is_kept() {
    let layers = raw("A:x\\ \t\n{B:1;}");
    let a = layers[0].get("A").unwrap();
    assert_eq!(a.value(), Some("x "));
    assert_eq!(a.get("B").and_then(Node::value), Some("1"));

    let layers = raw(r"Key\ {B:1;}");
    assert!(layers[0].contains_key("Key "));

    // unescaped whitespace is still trimmed
    let layers = raw("A:x \t{B:1;}");
    assert_eq!(layers[0].get("A").and_then(Node::value), Some("x"));
}

#[test]
fn test_unterminated_block_is_closed_at_eof() {
    let layers = raw("Outer{Inner:5;");
    let outer = layers[0].get("Outer").expect("Outer missing");
    assert_eq!(outer.get("Inner").and_then(Node::value), Some("5"));
}

#[test]
fn test_stray_closing_brace_keeps_accumulated() {
    let layers = raw("A:1;}B:2;");
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].keys().collect::<Vec<_>>(), vec!["A"]);
}

#[test]
fn test_unterminated_text_is_dropped() {
    let layers = raw("A:1;B:2");
    assert_eq!(layers[0].keys().collect::<Vec<_>>(), vec!["A"]);

    let layers = raw("Outer{A:1;B:2}");
    let outer = layers[0].get("Outer").expect("Outer missing");
    assert_eq!(outer.layer_count(), 1);
    assert!(outer.get("B").is_none());
}

#[test]
fn test_empty_block_has_no_layers() {
    let layers = raw("Empty{}");
    let empty = layers[0].get("Empty").expect("Empty missing");
    assert!(empty.is_leaf());
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(raw("").is_empty());
    assert!(raw(" \n\t\r\n").is_empty());
    assert!(raw("// only a comment").is_empty());
}

#[test]
fn test_nesting_too_deep() {
    let options = ParseOptions {
        max_depth: 3,
        ..ParseOptions::default()
    };
    assert!(parse_with("A{B{C{D:1;}}}", &options).is_ok());

    let err = parse_with("A{B{C{D{E:1;}}}}", &options).unwrap_err();
    assert!(matches!(err, NdfError::NestingTooDeep { depth: 3, .. }));
    assert_eq!(err.code(), Some(101));
}

#[test]
fn test_default_depth_accepts_deep_documents() {
    let depth = 300;
    let input = format!("{}Leaf:1;{}", "A{".repeat(depth), "}".repeat(depth));
    let layers = parse(&input).expect("300 levels are within the default limit");

    let mut node = layers[0].get("A").unwrap();
    for _ in 1..depth {
        node = node.get("A").unwrap();
    }
    assert_eq!(node.get("Leaf").and_then(Node::value), Some("1"));

    let text = crate::writer::render_layers(&layers, false);
    assert_eq!(parse(&text).unwrap(), layers);
}

#[test]
fn test_adversarial_depth_fails_cleanly() {
    let input = "A{".repeat(100_000);
    let err = parse(&input).unwrap_err();
    assert!(matches!(err, NdfError::NestingTooDeep { .. }));
}

#[test]
fn test_parse_node_wraps_in_root() {
    let root = Parser::new("A:1;").parse_node().expect("Failed to parse");
    assert!(root.is_root());
    assert_eq!(root.get("A").and_then(Node::value), Some("1"));
}

#[test]
fn test_preprocess_can_be_disabled() {
    let layers = raw("A:@PP.Expand[1,2];");
    assert_eq!(layers.len(), 1);
    assert_eq!(value_of(&layers[0], "A"), Some("@PP.Expand[1,2]"));

    let layers = parse("A:@PP.Expand[1,2];").expect("Failed to parse");
    assert_eq!(layers.len(), 2);
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: ParseOptions = serde_json::from_str(r#"{"preprocess": false}"#).unwrap();
    assert!(!options.preprocess);
    assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
}
