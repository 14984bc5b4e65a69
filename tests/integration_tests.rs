//! End-to-end tests of the public surface against a small event-processing
//! class library layered on top of the core types.

use lineage::{
    CachedOracle, Compatibility, ExclusionFilters, LineageError, NamePattern, SignatureError,
    Subject, TOP_TYPE_NAME, TypeDef, TypeDefId, TypeNode, TypeRef, TypeRegistry,
    check_signature, parse, parse_signature, parse_with_filters,
};
use regex::Regex;
use std::sync::Arc;

struct Library {
    registry: TypeRegistry,
    order_created: TypeDefId,
    order_handler: TypeDefId,
    audit_pipeline: TypeDefId,
}

struct OrderCreatedValue;

/// ```text
/// interface com.acme.Event extends Serializable
/// abstract class com.acme.BaseEvent implements Event
/// class com.acme.OrderCreated extends BaseEvent implements Comparable<OrderCreated>
/// interface com.acme.Handler<E>
/// class com.acme.OrderHandler implements Handler<OrderCreated>
/// class com.acme.Pipeline<I, O> implements Function<I, O>
/// class com.acme.AuditPipeline extends Pipeline<OrderCreated, List<String>>
/// ```
fn library() -> Library {
    let registry = TypeRegistry::with_core_types();
    let lookup = |name: &str| registry.lookup(name).expect("core type");
    let serializable = lookup("java.io.Serializable");
    let comparable = lookup("java.lang.Comparable");
    let function = lookup("java.util.function.Function");
    let list = lookup("java.util.List");
    let string = lookup("java.lang.String");
    let object = lookup("java.lang.Object");

    let event = registry
        .register(TypeDef::interface("com.acme.Event").implements(TypeRef::Plain(serializable)));
    let base_event = registry.register(
        TypeDef::class("com.acme.BaseEvent")
            .extends(TypeRef::Plain(object))
            .implements(TypeRef::Plain(event)),
    );
    let order_created = registry
        .register(TypeDef::class("com.acme.OrderCreated").extends(TypeRef::Plain(base_event)));
    registry.add_interface(
        order_created,
        TypeRef::parameterized(comparable, [TypeRef::Plain(order_created)]),
    );
    registry.bind_rust_type::<OrderCreatedValue>(order_created);

    let handler = registry.register(TypeDef::interface("com.acme.Handler").with_type_params(["E"]));
    let order_handler = registry.register(
        TypeDef::class("com.acme.OrderHandler")
            .extends(TypeRef::Plain(object))
            .implements(TypeRef::parameterized(handler, [TypeRef::Plain(order_created)])),
    );

    let pipeline = registry.register(
        TypeDef::class("com.acme.Pipeline")
            .with_type_params(["I", "O"])
            .extends(TypeRef::Plain(object))
            .implements(TypeRef::parameterized(
                function,
                [TypeRef::variable("I"), TypeRef::variable("O")],
            )),
    );
    let audit_pipeline = registry.register(TypeDef::class("com.acme.AuditPipeline").extends(
        TypeRef::parameterized(
            pipeline,
            [
                TypeRef::Plain(order_created),
                TypeRef::parameterized(list, [TypeRef::Plain(string)]),
            ],
        ),
    ));

    Library {
        registry,
        order_created,
        order_handler,
        audit_pipeline,
    }
}

const ORDER_CREATED: &str = "com.acme.OrderCreated<\
     java.lang.Comparable<com.acme.OrderCreated>, \
     com.acme.BaseEvent<com.acme.Event>>";

#[test]
fn order_event_lineage() {
    let lib = library();
    let tree = parse(&lib.registry, Subject::Type(lib.order_created));
    assert_eq!(tree.render(), ORDER_CREATED);
    assert_eq!(tree.compare_to(&tree), 0);
}

#[test]
fn value_subjects_use_bound_runtime_types() {
    let lib = library();
    let from_value = parse(&lib.registry, Subject::value(&OrderCreatedValue));
    let from_type = parse(&lib.registry, Subject::Type(lib.order_created));
    assert_eq!(from_value, from_type);
}

#[test]
fn handler_argument_recurses_into_plain_type_as_leaf() {
    let lib = library();
    let tree = parse(&lib.registry, Subject::Type(lib.order_handler));
    assert_eq!(
        tree.render(),
        "com.acme.OrderHandler<com.acme.Handler<com.acme.OrderCreated>>"
    );
}

#[test]
fn parameterized_super_type_carries_nested_arguments() {
    let lib = library();
    let tree = parse(&lib.registry, Subject::Type(lib.audit_pipeline));
    assert_eq!(
        tree.render(),
        "com.acme.AuditPipeline<com.acme.Pipeline<\
         com.acme.OrderCreated, \
         java.util.List<java.lang.String, java.util.Collection<?, java.lang.Iterable<?>>>, \
         java.util.function.Function<?, ?>>>"
    );
}

#[test]
fn check_signature_classifies_wildcards() {
    let lib = library();
    let subject = Subject::Type(lib.order_handler);

    let exact = check_signature(
        &lib.registry,
        subject,
        None,
        "com.acme.OrderHandler<com.acme.Handler<com.acme.OrderCreated>>",
    )
    .expect("same shape");
    assert_eq!(exact, Compatibility::Exact);

    let loose = check_signature(
        &lib.registry,
        subject,
        None,
        "com.acme.OrderHandler<com.acme.Handler<?>>",
    )
    .expect("wildcard target");
    assert_eq!(loose, Compatibility::TargetUnknown);
}

#[test]
fn check_signature_reports_mismatch_and_syntax_errors() {
    let lib = library();
    let subject = Subject::Type(lib.order_handler);

    let err = check_signature(
        &lib.registry,
        subject,
        None,
        "com.acme.OrderHandler<com.acme.Handler<java.lang.String>>",
    )
    .expect_err("argument differs");
    let LineageError::Mismatch(mismatch) = err else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert_eq!(mismatch.source_name(), "com.acme.OrderCreated");
    assert_eq!(mismatch.target_name(), Some("java.lang.String"));

    let err = check_signature(&lib.registry, subject, None, "com.acme.OrderHandler<")
        .expect_err("malformed signature");
    assert!(matches!(
        err,
        LineageError::Signature(SignatureError::UnexpectedEnd { .. })
    ));
}

#[test]
fn filters_trim_library_types() {
    let lib = library();
    let filters = ExclusionFilters::from_patterns(
        Some("com\\.acme\\.Base.*"),
        None,
        Some("java\\.lang\\..*"),
        None,
    )
    .expect("valid patterns");

    let tree = parse_with_filters(&lib.registry, Subject::Type(lib.order_created), Some(&filters));
    assert_eq!(tree, TypeNode::new("com.acme.OrderCreated"));

    let signature = "com.acme.OrderCreated";
    let result = check_signature(
        &lib.registry,
        Subject::Type(lib.order_created),
        Some(&filters),
        signature,
    );
    assert_eq!(result.ok(), Some(Compatibility::Exact));
}

#[test]
fn child_count_mismatch_message_lists_children() {
    let lib = library();
    let tree = parse(&lib.registry, Subject::Type(lib.order_created));
    let flattened =
        parse_signature("com.acme.OrderCreated<java.lang.Comparable<?>>").expect("valid");

    let err = tree.compare(&flattened).expect_err("child counts differ");
    let shape = Regex::new(concat!(
        r"^Source type 'com\.acme\.OrderCreated' has 2 subTypes ",
        r"\(java\.lang\.Comparable, com\.acme\.BaseEvent\) ",
        r"while 'com\.acme\.OrderCreated' has 1 subTypes \(java\.lang\.Comparable\)$",
    ))
    .expect("valid regex");
    assert!(shape.is_match(err.message()), "{}", err.message());
    assert_eq!(tree.compare_to(&flattened), -1);
}

#[test]
fn first_child_matching_finds_nested_ancestors() {
    let lib = library();
    let tree = parse(&lib.registry, Subject::Type(lib.audit_pipeline));

    let pattern = NamePattern::new("java\\.util\\..*").expect("valid");
    let found = tree.first_child_matching(&pattern).expect("List is reachable");
    assert_eq!(found.name(), "java.util.List");

    let missing = NamePattern::new("com\\.acme\\.Missing").expect("valid");
    assert!(tree.first_child_matching(&missing).is_none());
}

#[test]
fn trees_serialize_as_name_and_children() {
    let lib = library();
    let tree = parse(&lib.registry, Subject::Type(lib.order_handler));

    let json = serde_json::to_string(&tree).expect("serialize");
    let back: TypeNode = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, tree);
    assert!(json.starts_with(r#"{"name":"com.acme.OrderHandler","children":["#));
}

#[test]
fn wildcard_name_is_question_mark() {
    assert_eq!(TypeNode::top().name(), TOP_TYPE_NAME);
    assert_eq!(TOP_TYPE_NAME, "?");
}

#[test]
fn concurrent_parsing_shares_one_cached_oracle() {
    let lib = library();
    let handles = [lib.order_created, lib.order_handler, lib.audit_pipeline];
    let expected: Vec<TypeNode> = handles
        .iter()
        .map(|handle| parse(&lib.registry, Subject::Type(*handle)))
        .collect();

    let oracle = Arc::new(CachedOracle::new(lib.registry));
    let workers: Vec<_> = (0..8)
        .map(|i| {
            let oracle = Arc::clone(&oracle);
            let handle = handles[i % handles.len()];
            std::thread::spawn(move || parse(oracle.as_ref(), Subject::Type(handle)))
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        let tree = worker.join().expect("worker finished");
        assert_eq!(tree, expected[i % handles.len()]);
    }
    assert!(oracle.hits() > 0);
}
