//! Hierarchy parser: turns a subject into its lineage tree.
//!
//! For a type `X` the tree is built as:
//!
//! 1. a node named after `X`'s canonical name;
//! 2. one leaf per declared type parameter, resolved by name (placeholders
//!    become the wildcard sentinel), unless pruned by the class-param
//!    filter;
//! 3. one child per implemented interface, unless pruned by the interface
//!    filter. A parameterized interface becomes a node named after its raw
//!    type whose children are its actual arguments followed by the raw
//!    type's own interfaces and super-type. A plain interface is a leaf;
//! 4. the super-type, unless it is the universal top type or pruned by the
//!    class filter. A parameterized super-type is expanded like a
//!    parameterized interface; a plain one is expanded fully.
//!
//! Arguments of a parameterized reference replace the raw type's declared
//! parameters; they are never listed twice.
//!
//! # Termination
//!
//! Every expansion is keyed in a [`RecursionGuard`] using the
//! [`HierarchyWalk`](RecursionProfile::HierarchyWalk) profile: a full
//! expansion by its handle, a parameterized one by the raw type together
//! with its arguments. Nested applications of the same raw type
//! (`List<List<Integer>>`) are different keys and expand fully. Re-entering
//! a key already on the current path (the second `Comparable<Foo<T>>` under
//! `Foo<T> implements Comparable<Foo<T>>`), or an expansion past the depth
//! or node budget, yields a childless node carrying the type's canonical
//! name. Shared ancestors reached along sibling paths are expanded each
//! time.

use crate::diagnostics::LineageError;
use crate::filters::{ExclusionFilters, FilterKind};
use crate::node::TypeNode;
use crate::oracle::TypeOracle;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{Subject, TypeRef};
use lineage_common::limits::{STACK_GROWTH, STACK_RED_ZONE};
use lineage_common::names::is_placeholder_name;
use lineage_common::TOP_TYPE_NAME;
use tracing::{debug, debug_span, trace};

/// Builds lineage trees from a [`TypeOracle`].
///
/// A parser is immutable and can build any number of trees; each call gets
/// its own recursion guard.
pub struct HierarchyParser<'o, O: TypeOracle> {
    oracle: &'o O,
    filters: ExclusionFilters,
    profile: RecursionProfile,
}

impl<'o, O: TypeOracle> HierarchyParser<'o, O> {
    /// A parser with no filters and the default walk limits.
    pub fn new(oracle: &'o O) -> Self {
        Self {
            oracle,
            filters: ExclusionFilters::default(),
            profile: RecursionProfile::HierarchyWalk,
        }
    }

    pub fn with_filters(mut self, filters: ExclusionFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Override the depth and node limits of the walk.
    pub fn with_profile(mut self, profile: RecursionProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn filters(&self) -> &ExclusionFilters {
        &self.filters
    }

    /// Build the lineage tree for `subject`.
    pub fn parse(&self, subject: Subject<'_, O::Handle>) -> TypeNode {
        let _span = debug_span!("parse", ?subject).entered();
        let mut walk = HierarchyWalk {
            oracle: self.oracle,
            filters: &self.filters,
            guard: RecursionGuard::with_profile(self.profile),
        };
        let node = walk.subject_node(subject);
        debug!(
            root = node.name(),
            nodes = node.node_count(),
            depth = node.depth(),
            steps = walk.guard.iterations(),
            truncated = walk.guard.is_truncated(),
            "lineage tree built"
        );
        node
    }
}

/// Build the lineage tree for `subject` with no filters.
pub fn parse<O: TypeOracle>(
    oracle: &O,
    subject: Subject<'_, O::Handle>,
) -> TypeNode {
    HierarchyParser::new(oracle).parse(subject)
}

/// Build the lineage tree for `subject`; `None` means no filters.
pub fn parse_with_filters<O: TypeOracle>(
    oracle: &O,
    subject: Subject<'_, O::Handle>,
    filters: Option<&ExclusionFilters>,
) -> TypeNode {
    let parser = HierarchyParser::new(oracle);
    match filters {
        Some(filters) => parser.with_filters(filters.clone()).parse(subject),
        None => parser.parse(subject),
    }
}

/// Like [`parse_with_filters`], but absent filters are a precondition
/// failure instead of a default.
pub fn parse_strict<O: TypeOracle>(
    oracle: &O,
    subject: Subject<'_, O::Handle>,
    filters: Option<&ExclusionFilters>,
) -> Result<TypeNode, LineageError> {
    let filters = filters.ok_or_else(|| LineageError::precondition("filters"))?;
    Ok(HierarchyParser::new(oracle)
        .with_filters(filters.clone())
        .parse(subject))
}

/// State of one tree construction.
struct HierarchyWalk<'a, O: TypeOracle> {
    oracle: &'a O,
    filters: &'a ExclusionFilters,
    guard: RecursionGuard<TypeRef<O::Handle>>,
}

impl<O: TypeOracle> HierarchyWalk<'_, O> {
    fn subject_node(&mut self, subject: Subject<'_, O::Handle>) -> TypeNode {
        match subject {
            Subject::Null => TypeNode::null(),
            Subject::Type(handle) => {
                let handle = self.boxed(handle);
                self.build_class(handle)
            }
            Subject::Value(value) => match self.oracle.runtime_type(value) {
                Some(handle) => {
                    let handle = self.boxed(handle);
                    self.build_class(handle)
                }
                None => {
                    debug!(type_id = ?(*value).type_id(), "runtime type unknown to oracle");
                    TypeNode::top()
                }
            },
        }
    }

    /// Swap a primitive handle for its boxed reference type.
    fn boxed(&self, handle: O::Handle) -> O::Handle {
        let Some(kind) = self.oracle.primitive_kind(handle) else {
            return handle;
        };
        match self.oracle.resolve_name(kind.boxed_name()) {
            Some(boxed) => {
                trace!(%kind, boxed = kind.boxed_name(), "boxing primitive");
                boxed
            }
            None => {
                debug!(%kind, "boxed type not known to oracle; keeping primitive");
                handle
            }
        }
    }

    /// Full expansion of a named type: declared parameters, interfaces,
    /// super-type.
    fn build_class(&mut self, handle: O::Handle) -> TypeNode {
        self.guarded(handle, TypeRef::Plain(handle), |walk| {
            let mut node = TypeNode::new(walk.oracle.canonical_name(handle));
            for param in walk.oracle.declared_type_parameters(handle) {
                let resolved = walk.resolve_leaf_name(&param);
                if walk.filters.excludes(FilterKind::ClassParam, &resolved) {
                    trace!(param = %param, resolved = %resolved, "class param filtered");
                    continue;
                }
                node.push_child(TypeNode::new(resolved));
            }
            walk.attach_lineage(handle, &mut node);
            node
        })
    }

    /// Expansion of a generic type applied to actual arguments.
    ///
    /// Keyed by the whole application, so `List<List<E>>` still expands its
    /// inner `List<E>`.
    fn build_parameterized(&mut self, raw: O::Handle, args: &[TypeRef<O::Handle>]) -> TypeNode {
        let key = TypeRef::parameterized(raw, args.iter().cloned());
        self.guarded(raw, key, |walk| {
            let mut node = TypeNode::new(walk.oracle.canonical_name(raw));
            for arg in args {
                if let Some(child) = walk.build_argument(arg) {
                    node.push_child(child);
                }
            }
            walk.attach_lineage(raw, &mut node);
            node
        })
    }

    fn build_argument(&mut self, arg: &TypeRef<O::Handle>) -> Option<TypeNode> {
        match arg {
            TypeRef::Parameterized { raw, args } => {
                let name = self.oracle.canonical_name(*raw);
                if self.filters.excludes(FilterKind::InterfaceParam, &name) {
                    trace!(%name, "interface param filtered");
                    return None;
                }
                Some(self.build_parameterized(*raw, args))
            }
            leaf => {
                let name = self.leaf_name(leaf);
                if self.filters.excludes(FilterKind::InterfaceParam, &name) {
                    trace!(%name, "interface param filtered");
                    return None;
                }
                Some(TypeNode::new(name))
            }
        }
    }

    fn attach_lineage(&mut self, handle: O::Handle, node: &mut TypeNode) {
        self.attach_interfaces(handle, node);
        self.attach_super_type(handle, node);
    }

    fn attach_interfaces(&mut self, handle: O::Handle, node: &mut TypeNode) {
        for interface in self.oracle.interfaces(handle) {
            match &interface {
                TypeRef::Parameterized { raw, args } => {
                    let name = self.oracle.canonical_name(*raw);
                    if self.filters.excludes(FilterKind::Interface, &name) {
                        trace!(%name, "interface filtered");
                        continue;
                    }
                    node.push_child(self.build_parameterized(*raw, args));
                }
                leaf => {
                    let name = self.leaf_name(leaf);
                    if self.filters.excludes(FilterKind::Interface, &name) {
                        trace!(%name, "interface filtered");
                        continue;
                    }
                    node.push_child(TypeNode::new(name));
                }
            }
        }
    }

    fn attach_super_type(&mut self, handle: O::Handle, node: &mut TypeNode) {
        let Some(super_type) = self.oracle.super_type(handle) else {
            return;
        };
        let Some(&super_handle) = super_type.handle() else {
            debug!(?super_type, "super-type is a type variable; skipping");
            return;
        };
        if self.oracle.is_universal_top(super_handle) {
            return;
        }
        let name = self.oracle.canonical_name(super_handle);
        if self.filters.excludes(FilterKind::Class, &name) {
            trace!(%name, "super-type filtered");
            return;
        }
        let child = match &super_type {
            TypeRef::Parameterized { raw, args } => self.build_parameterized(*raw, args),
            _ => self.build_class(super_handle),
        };
        node.push_child(child);
    }

    /// Name of a plain or variable reference that becomes a leaf.
    fn leaf_name(&self, reference: &TypeRef<O::Handle>) -> String {
        debug_assert!(
            !reference.is_parameterized(),
            "parameterized references are expanded, never leaves"
        );
        match reference {
            TypeRef::Variable(name) => self.resolve_leaf_name(name),
            TypeRef::Plain(handle) | TypeRef::Parameterized { raw: handle, .. } => {
                if self.oracle.is_universal_top(*handle) {
                    TOP_TYPE_NAME.to_string()
                } else {
                    self.resolve_leaf_name(&self.oracle.canonical_name(*handle))
                }
            }
        }
    }

    /// Resolve a raw spelling to the name stored in the tree.
    fn resolve_leaf_name(&self, name: &str) -> String {
        if is_placeholder_name(name) {
            return TOP_TYPE_NAME.to_string();
        }
        match self.oracle.resolve_name(name) {
            Some(handle) if self.oracle.is_universal_top(handle) => TOP_TYPE_NAME.to_string(),
            Some(handle) => self.oracle.canonical_name(handle),
            None => {
                debug!(%name, "name did not resolve; using wildcard");
                TOP_TYPE_NAME.to_string()
            }
        }
    }

    /// Run `build` with `key` on the active path. A denied entry yields a
    /// childless node named after `handle`.
    fn guarded(
        &mut self,
        handle: O::Handle,
        key: TypeRef<O::Handle>,
        build: impl FnOnce(&mut Self) -> TypeNode,
    ) -> TypeNode {
        match self.guard.enter(&key) {
            RecursionResult::Entered => {
                let node = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || build(self));
                self.guard.leave(&key);
                trace!(name = node.name(), children = node.children().len(), "node built");
                node
            }
            denied => {
                let name = self.oracle.canonical_name(handle);
                debug!(%name, ?denied, depth = self.guard.depth(), "hierarchy walk cut off");
                TypeNode::new(name)
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
