use super::*;

fn parse(text: &str) -> TypeNode {
    parse_signature(text).unwrap_or_else(|err| panic!("{text}: {err}"))
}

#[test]
fn test_plain_name() {
    assert_eq!(parse("java.lang.String"), TypeNode::new("java.lang.String"));
    assert_eq!(parse("  java.lang.String \n"), TypeNode::new("java.lang.String"));
}

#[test]
fn test_nested_arguments() {
    let node = parse("java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>");
    assert_eq!(node.name(), "java.util.Map");
    assert_eq!(node.children().len(), 2);
    assert_eq!(node.children()[1].render(), "java.util.List<java.lang.Integer>");
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(
        parse("a.A<a.B,a.C<a.D>>"),
        parse("a.A < a.B ,  a.C<a.D > >")
    );
}

#[test]
fn test_wildcards_become_top() {
    let node = parse("java.util.List<?>");
    assert!(node.children()[0].is_top());

    let bounded = parse("java.util.List<? extends java.lang.Number>");
    assert_eq!(bounded, node);

    let lower = parse("java.util.List<? super java.lang.Integer>");
    assert_eq!(lower, node);

    assert_eq!(parse("?"), TypeNode::top());
}

#[test]
fn test_placeholders_become_top() {
    assert_eq!(parse("T"), TypeNode::top());
    assert_eq!(parse("java.util.Map<K, V>").render(), "java.util.Map<?, ?>");
    // Unqualified generic names drop their arguments.
    assert_eq!(parse("List<java.lang.String>"), TypeNode::top());
    assert_eq!(parse("java.lang.String[]"), TypeNode::top());
}

#[test]
fn test_render_round_trip() {
    for text in [
        "java.lang.String",
        "?",
        "a.A<a.B, a.C<a.D>>",
        "java.util.ArrayList<?, java.util.List<?, java.util.Collection<?, java.lang.Iterable<?>>>>",
    ] {
        let node = parse(text);
        assert_eq!(node.render(), text);
        assert_eq!(parse(&node.render()), node);
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_signature(""), Err(SignatureError::UnexpectedEnd { position: 0 }));
    assert_eq!(parse_signature("   "), Err(SignatureError::UnexpectedEnd { position: 3 }));
}

#[test]
fn test_unclosed_arguments() {
    assert_eq!(
        parse_signature("a.B<c.D"),
        Err(SignatureError::UnexpectedEnd { position: 7 })
    );
}

#[test]
fn test_empty_arguments() {
    assert_eq!(
        parse_signature("a.B<>"),
        Err(SignatureError::EmptyArgument { position: 4 })
    );
    assert_eq!(
        parse_signature("a.B<c.D,>"),
        Err(SignatureError::EmptyArgument { position: 8 })
    );
}

#[test]
fn test_trailing_input() {
    assert_eq!(
        parse_signature("a.B>x"),
        Err(SignatureError::TrailingInput { position: 3 })
    );
    assert_eq!(
        parse_signature("a.B c.D"),
        Err(SignatureError::TrailingInput { position: 4 })
    );
}

#[test]
fn test_unexpected_character() {
    assert_eq!(
        parse_signature("<a.B>"),
        Err(SignatureError::UnexpectedChar {
            found: '<',
            position: 0
        })
    );
}

#[test]
fn test_nesting_limit() {
    let depth = lineage_common::limits::MAX_SIGNATURE_DEPTH as usize + 1;
    let text = format!("{}a.Z{}", "a.A<".repeat(depth), ">".repeat(depth));
    assert!(matches!(
        parse_signature(&text),
        Err(SignatureError::TooDeep { .. })
    ));

    let ok = format!("{}a.Z{}", "a.A<".repeat(depth - 1), ">".repeat(depth - 1));
    assert_eq!(parse(&ok).depth(), depth);
}
