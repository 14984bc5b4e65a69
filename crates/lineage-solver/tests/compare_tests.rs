use super::*;
use crate::parser::parse;
use crate::registry::{TypeDef, TypeRegistry};
use crate::signature::parse_signature;
use crate::types::{Subject, TypeRef};

fn sig(text: &str) -> TypeNode {
    parse_signature(text).unwrap_or_else(|err| panic!("{text}: {err}"))
}

fn parsed(registry: &TypeRegistry, name: &str) -> TypeNode {
    let handle = registry.lookup(name).unwrap_or_else(|| panic!("{name} not registered"));
    parse(registry, Subject::Type(handle))
}

// =============================================================================
// Compatibility fold
// =============================================================================

#[test]
fn test_codes() {
    assert_eq!(Compatibility::Exact.code(), 0);
    assert_eq!(Compatibility::SourceUnknown.code(), 1);
    assert_eq!(Compatibility::TargetUnknown.code(), 2);
    assert_eq!(Compatibility::BothUnknown.code(), 3);
}

#[test]
fn test_merge_table() {
    use Compatibility::*;

    let all = [Exact, SourceUnknown, TargetUnknown, BothUnknown];
    for a in all {
        assert_eq!(a.merge(Exact), a);
        assert_eq!(Exact.merge(a), a);
        assert_eq!(a.merge(a), a);
        assert_eq!(a.merge(BothUnknown), BothUnknown);
        for b in all {
            assert_eq!(a.merge(b), b.merge(a));
            assert_eq!(a.merge(b).code(), a.code() | b.code());
        }
    }
    assert_eq!(SourceUnknown.merge(TargetUnknown), BothUnknown);
}

#[test]
fn test_side_flags() {
    assert!(Compatibility::Exact.is_exact());
    assert!(Compatibility::SourceUnknown.source_unknown());
    assert!(!Compatibility::SourceUnknown.target_unknown());
    assert!(Compatibility::BothUnknown.source_unknown());
    assert!(Compatibility::BothUnknown.target_unknown());
}

#[test]
fn test_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&Compatibility::SourceUnknown).expect("serialize"),
        "\"source_unknown\""
    );
}

// =============================================================================
// Leaf comparisons
// =============================================================================

#[test]
fn test_top_against_top() {
    assert_eq!(TypeNode::top().compare(&TypeNode::top()), Ok(Compatibility::BothUnknown));
    assert_eq!(TypeNode::top().compare_to(&TypeNode::top()), 3);
}

#[test]
fn test_top_absorbs_concrete_names() {
    let string = TypeNode::new("java.lang.String");
    assert_eq!(TypeNode::top().compare_to(&string), 1);
    assert_eq!(string.compare_to(&TypeNode::top()), 2);
}

#[test]
fn test_top_absorbs_whole_subtrees() {
    let tree = sig("java.util.List<java.lang.String>");
    assert_eq!(TypeNode::top().compare(&tree), Ok(Compatibility::SourceUnknown));
    assert_eq!(tree.compare(&TypeNode::top()), Ok(Compatibility::TargetUnknown));
}

#[test]
fn test_unrelated_leaves_mismatch() {
    let integer = TypeNode::new("java.lang.Integer");
    let string = TypeNode::new("java.lang.String");

    let err = integer.compare(&string).expect_err("names differ");
    assert_eq!(err.source_name(), "java.lang.Integer");
    assert_eq!(err.target_name(), Some("java.lang.String"));
    assert_eq!(integer.compare_to(&string), MISMATCH);
}

#[test]
fn test_absent_target() {
    let node = TypeNode::new("java.lang.String");
    let err = node.compare(None::<&TypeNode>).expect_err("target is absent");
    assert_eq!(err.target_name(), None);
    assert_eq!(node.compare_to(None::<&TypeNode>), -1);
}

// =============================================================================
// Tree comparisons
// =============================================================================

#[test]
fn test_self_comparison() {
    let registry = TypeRegistry::with_core_types();

    let integer = parsed(&registry, "java.lang.Integer");
    assert_eq!(integer.compare_to(&integer), 0);

    let list = parsed(&registry, "java.util.ArrayList");
    assert!(list.contains_top());
    assert_eq!(list.compare_to(&list), 3);
}

#[test]
fn test_self_comparison_of_every_core_type() {
    let registry = TypeRegistry::with_core_types();
    for name in registry.names() {
        let tree = parsed(&registry, &name);
        let expected = if tree.contains_top() { 3 } else { 0 };
        assert_eq!(tree.compare_to(&tree), expected, "{name}");
    }
}

#[test]
fn test_wildcard_argument_matches_concrete_argument() {
    let generic = sig("java.util.List<?>");
    let concrete = sig("java.util.List<java.lang.String>");

    assert_eq!(generic.compare_to(&concrete), 1);
    assert_eq!(concrete.compare_to(&generic), 2);
}

#[test]
fn test_wildcards_on_both_sides_fold_to_both_unknown() {
    let left = sig("demo.Pair<?, java.lang.String>");
    let right = sig("demo.Pair<java.lang.Integer, ?>");
    assert_eq!(left.compare(&right), Ok(Compatibility::BothUnknown));
}

#[test]
fn test_child_count_mismatch_message() {
    let source = sig("S.S<a.a, b.b>");
    let target = sig("S.S<a.a, b.b, c.c>");

    let err = source.compare(&target).expect_err("counts differ");
    assert_eq!(
        err.message(),
        "Source type 'S.S' has 2 subTypes (a.a, b.b) while 'S.S' has 3 subTypes (a.a, b.b, c.c)"
    );
}

#[test]
fn test_nested_mismatch_aborts() {
    let source = sig("demo.Box<?, java.lang.Integer>");
    let target = sig("demo.Box<java.lang.String, java.lang.String>");

    let err = source.compare(&target).expect_err("second argument differs");
    assert_eq!(err.source_name(), "java.lang.Integer");
    assert_eq!(source.compare_to(&target), -1);
}

#[test]
fn test_generic_subject_against_registered_tree() {
    let registry = TypeRegistry::with_core_types();
    let list = registry.lookup("java.util.List").expect("core type");
    let string = registry.lookup("java.lang.String").expect("core type");
    let holder = registry.register(
        TypeDef::class("demo.Names")
            .implements(TypeRef::parameterized(list, [TypeRef::Plain(string)])),
    );
    let names = parse(&registry, Subject::Type(holder));
    let expected = sig(
        "demo.Names<java.util.List<java.lang.String, \
         java.util.Collection<?, java.lang.Iterable<?>>>>",
    );

    assert_eq!(names.compare_to(&expected), 3);
    assert_eq!(expected.compare(&names), Ok(Compatibility::BothUnknown));
}

#[test]
fn test_comparison_depth_limit_is_an_error() {
    let mut text = String::new();
    for i in 0..20 {
        text.push_str(&format!("demo.N{i}<"));
    }
    text.push_str("demo.Leaf");
    text.push_str(&">".repeat(20));
    let tree = sig(&text);

    let mut comparator = StructuralComparator::with_profile(RecursionProfile::Custom {
        max_depth: 5,
        max_iterations: u32::MAX,
    });
    let err = comparator.compare(&tree, &tree).expect_err("too deep");
    assert!(err.message().contains("maximum nesting depth of 5"));

    // The comparator can be reused after an error.
    assert_eq!(compare_nodes(&tree, &tree), Ok(Compatibility::Exact));
    let shallow = TypeNode::new("demo.Leaf");
    assert_eq!(comparator.compare(&shallow, &shallow), Ok(Compatibility::Exact));
}
