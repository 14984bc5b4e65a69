//! In-memory type definitions and a thread-safe registry that serves them
//! through [`TypeOracle`].
//!
//! The registry lets hierarchies be described directly (tests, embedding
//! applications, snapshots of another type system) without any reflection
//! layer:
//!
//! ```ignore
//! let registry = TypeRegistry::new();
//! let object = registry.register(TypeDef::class("demo.Object").top());
//! let list = registry.register(TypeDef::interface("demo.List").with_type_params(["E"]));
//! let names = registry.register(
//!     TypeDef::class("demo.Names")
//!         .extends(TypeRef::Plain(object))
//!         .implements(TypeRef::parameterized(list, [TypeRef::Plain(string)])),
//! );
//! ```
//!
//! ## Handle allocation
//!
//! Handles are allocated sequentially from [`TypeDefId::FIRST_VALID`];
//! [`TypeDefId::INVALID`] is never handed out.

use crate::oracle::TypeOracle;
use crate::types::TypeRef;
use dashmap::DashMap;
use indexmap::IndexMap;
use lineage_common::{NULL_TYPE_NAME, PrimitiveKind, TOP_TYPE_NAME};
use smallvec::SmallVec;
use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::trace;

/// Global counter for telling registry instances apart in traces.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// TypeDefId
// =============================================================================

/// Handle of a type registered in a [`TypeRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDefId(pub u32);

impl TypeDefId {
    /// Sentinel value for an invalid handle.
    pub const INVALID: Self = Self(0);

    /// First valid handle.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

// =============================================================================
// TypeDef
// =============================================================================

/// Kind of registered type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDefKind {
    Class,
    Interface,
    /// A raw primitive; hierarchy walks swap it for its boxed type.
    Primitive(PrimitiveKind),
}

/// Everything the registry knows about one type.
#[derive(Clone, Debug)]
pub struct TypeDef {
    pub kind: TypeDefKind,
    /// Canonical, fully qualified name.
    pub name: String,
    /// Declared type-parameter placeholders, in order.
    pub type_params: SmallVec<[String; 2]>,
    /// Super-type (`extends` for classes).
    pub super_type: Option<TypeRef<TypeDefId>>,
    /// Implemented (or, for interfaces, extended) interfaces, in order.
    pub interfaces: SmallVec<[TypeRef<TypeDefId>; 4]>,
    /// Whether this is the universal top type.
    pub is_top: bool,
}

impl TypeDef {
    fn new(kind: TypeDefKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_params: SmallVec::new(),
            super_type: None,
            interfaces: SmallVec::new(),
            is_top: false,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeDefKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeDefKind::Interface, name)
    }

    /// A raw primitive, named by its keyword (`int`, `boolean`, ...).
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(TypeDefKind::Primitive(kind), kind.name())
    }

    pub fn with_type_params<S: Into<String>>(
        mut self,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn extends(mut self, super_type: TypeRef<TypeDefId>) -> Self {
        self.super_type = Some(super_type);
        self
    }

    pub fn implements(mut self, interface: TypeRef<TypeDefId>) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Mark as the universal top type.
    pub fn top(mut self) -> Self {
        self.is_top = true;
        self
    }
}

// =============================================================================
// TypeRegistry
// =============================================================================

/// Thread-safe storage for type definitions.
///
/// Definitions live in a `DashMap` so concurrent hierarchy walks can read
/// while other threads register. The name index keeps registration order.
pub struct TypeRegistry {
    instance_id: u64,
    definitions: DashMap<TypeDefId, TypeDef>,
    names: RwLock<IndexMap<String, TypeDefId>>,
    rust_types: DashMap<TypeId, TypeDefId>,
    next_id: AtomicU32,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        trace!(instance_id, "TypeRegistry::new");
        Self {
            instance_id,
            definitions: DashMap::new(),
            names: RwLock::new(IndexMap::new()),
            rust_types: DashMap::new(),
            next_id: AtomicU32::new(TypeDefId::FIRST_VALID),
        }
    }

    fn allocate(&self) -> TypeDefId {
        TypeDefId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Register a definition and return its handle.
    ///
    /// Registering a name twice points the name at the newer definition;
    /// the older handle stays valid.
    pub fn register(&self, def: TypeDef) -> TypeDefId {
        let id = self.allocate();
        trace!(
            instance_id = self.instance_id,
            def_id = id.0,
            name = %def.name,
            kind = ?def.kind,
            "TypeRegistry::register"
        );
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(def.name.clone(), id);
        self.definitions.insert(id, def);
        id
    }

    /// Get a copy of a definition.
    pub fn get(&self, id: TypeDefId) -> Option<TypeDef> {
        self.definitions.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: TypeDefId) -> bool {
        self.definitions.contains_key(&id)
    }

    /// Handle currently registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<TypeDefId> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Replace the super-type of an existing definition.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn set_super_type(&self, id: TypeDefId, super_type: TypeRef<TypeDefId>) -> bool {
        match self.definitions.get_mut(&id) {
            Some(mut entry) => {
                entry.super_type = Some(super_type);
                true
            }
            None => false,
        }
    }

    /// Append an interface to an existing definition. Needed when a type
    /// refers to itself (`Integer implements Comparable<Integer>`).
    ///
    /// Returns `false` if `id` is unknown.
    pub fn add_interface(&self, id: TypeDefId, interface: TypeRef<TypeDefId>) -> bool {
        match self.definitions.get_mut(&id) {
            Some(mut entry) => {
                entry.interfaces.push(interface);
                true
            }
            None => false,
        }
    }

    /// Report `id` as the runtime type of Rust values of type `T`.
    pub fn bind_rust_type<T: Any>(&self, id: TypeDefId) {
        self.rust_types.insert(TypeId::of::<T>(), id);
    }

    /// A registry seeded with a small JVM-style base library.
    ///
    /// See [`core_types`](crate::registry::core_types) for what is defined.
    pub fn with_core_types() -> Self {
        let registry = Self::new();
        core_types::seed(&registry);
        registry
    }
}

impl TypeOracle for TypeRegistry {
    type Handle = TypeDefId;

    fn canonical_name(&self, handle: TypeDefId) -> String {
        self.definitions
            .get(&handle)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| TOP_TYPE_NAME.to_string())
    }

    fn declared_type_parameters(&self, handle: TypeDefId) -> Vec<String> {
        self.definitions
            .get(&handle)
            .map(|r| r.type_params.to_vec())
            .unwrap_or_default()
    }

    fn super_type(&self, handle: TypeDefId) -> Option<TypeRef<TypeDefId>> {
        self.definitions
            .get(&handle)
            .and_then(|r| r.super_type.clone())
    }

    fn interfaces(&self, handle: TypeDefId) -> Vec<TypeRef<TypeDefId>> {
        self.definitions
            .get(&handle)
            .map(|r| r.interfaces.to_vec())
            .unwrap_or_default()
    }

    fn resolve_name(&self, name: &str) -> Option<TypeDefId> {
        self.lookup(name)
    }

    fn is_universal_top(&self, handle: TypeDefId) -> bool {
        self.definitions.get(&handle).is_some_and(|r| r.is_top)
    }

    fn primitive_kind(&self, handle: TypeDefId) -> Option<PrimitiveKind> {
        self.definitions.get(&handle).and_then(|r| match r.kind {
            TypeDefKind::Primitive(kind) => Some(kind),
            TypeDefKind::Class | TypeDefKind::Interface => None,
        })
    }

    fn runtime_type(&self, value: &dyn Any) -> Option<TypeDefId> {
        self.rust_types.get(&(*value).type_id()).map(|r| *r)
    }
}

/// The base library installed by [`TypeRegistry::with_core_types`].
///
/// | Name | Declared as |
/// |------|-------------|
/// | `java.lang.Object` | top type |
/// | `java.io.Serializable`, `java.lang.Cloneable` | plain interfaces |
/// | `java.util.RandomAccess`, `java.lang.CharSequence` | plain interfaces |
/// | `java.lang.Comparable<T>`, `java.lang.Iterable<T>` | generic interfaces |
/// | `java.util.Collection<E>` | `extends Iterable<E>` |
/// | `java.util.List<E>` | `extends Collection<E>` |
/// | `java.util.function.Function<T, R>` | generic interface |
/// | `java.lang.Number` | `implements Serializable` |
/// | `java.lang.Integer`, `Long`, `Short` | `extends Number implements Comparable<Self>` |
/// | `java.lang.Byte`, `Float`, `Double` | `extends Number implements Comparable<Self>` |
/// | `java.lang.Boolean`, `java.lang.Character` | `implements Serializable, Comparable<Self>` |
/// | `java.lang.String` | `implements Serializable, Comparable<String>, CharSequence` |
/// | `java.lang.Void` | plain class |
/// | `java.util.AbstractCollection<E>` | `implements Collection<E>` |
/// | `java.util.AbstractList<E>` | `extends AbstractCollection<E> implements List<E>` |
/// | `java.util.ArrayList<E>` | `extends AbstractList<E>`, interfaces below |
/// | `java.util.concurrent.atomic.AtomicReference<V>` | `implements Serializable` |
/// | `null` | the null type |
/// | `short` .. `void` | primitives |
///
/// `ArrayList<E>` implements `List<E>`, `RandomAccess`, `Cloneable` and
/// `Serializable`, in that order.
pub mod core_types {
    use super::*;

    fn plain(id: TypeDefId) -> TypeRef<TypeDefId> {
        TypeRef::Plain(id)
    }

    fn var(name: &str) -> TypeRef<TypeDefId> {
        TypeRef::variable(name)
    }

    pub(super) fn seed(registry: &TypeRegistry) {
        let object = registry.register(TypeDef::class("java.lang.Object").top());
        let serializable = registry.register(TypeDef::interface("java.io.Serializable"));
        let cloneable = registry.register(TypeDef::interface("java.lang.Cloneable"));
        let random_access = registry.register(TypeDef::interface("java.util.RandomAccess"));
        let char_sequence = registry.register(TypeDef::interface("java.lang.CharSequence"));
        let comparable =
            registry.register(TypeDef::interface("java.lang.Comparable").with_type_params(["T"]));
        let iterable =
            registry.register(TypeDef::interface("java.lang.Iterable").with_type_params(["T"]));
        let collection = registry.register(
            TypeDef::interface("java.util.Collection")
                .with_type_params(["E"])
                .implements(TypeRef::parameterized(iterable, [var("E")])),
        );
        let list = registry.register(
            TypeDef::interface("java.util.List")
                .with_type_params(["E"])
                .implements(TypeRef::parameterized(collection, [var("E")])),
        );
        registry.register(
            TypeDef::interface("java.util.function.Function").with_type_params(["T", "R"]),
        );

        let number = registry.register(
            TypeDef::class("java.lang.Number")
                .extends(plain(object))
                .implements(plain(serializable)),
        );
        let boxed_numbers = [
            (PrimitiveKind::Int, "java.lang.Integer"),
            (PrimitiveKind::Long, "java.lang.Long"),
            (PrimitiveKind::Short, "java.lang.Short"),
            (PrimitiveKind::Byte, "java.lang.Byte"),
            (PrimitiveKind::Float, "java.lang.Float"),
            (PrimitiveKind::Double, "java.lang.Double"),
        ];
        for (kind, name) in boxed_numbers {
            debug_assert_eq!(kind.boxed_name(), name);
            let boxed = registry.register(TypeDef::class(name).extends(plain(number)));
            registry.add_interface(boxed, TypeRef::parameterized(comparable, [plain(boxed)]));
        }
        for name in ["java.lang.Boolean", "java.lang.Character"] {
            let boxed = registry.register(
                TypeDef::class(name)
                    .extends(plain(object))
                    .implements(plain(serializable)),
            );
            registry.add_interface(boxed, TypeRef::parameterized(comparable, [plain(boxed)]));
        }

        let string = registry.register(
            TypeDef::class("java.lang.String")
                .extends(plain(object))
                .implements(plain(serializable)),
        );
        registry.add_interface(string, TypeRef::parameterized(comparable, [plain(string)]));
        registry.add_interface(string, plain(char_sequence));

        registry.register(TypeDef::class("java.lang.Void").extends(plain(object)));
        registry.register(TypeDef::class(NULL_TYPE_NAME));

        let abstract_collection = registry.register(
            TypeDef::class("java.util.AbstractCollection")
                .with_type_params(["E"])
                .extends(plain(object))
                .implements(TypeRef::parameterized(collection, [var("E")])),
        );
        let abstract_list = registry.register(
            TypeDef::class("java.util.AbstractList")
                .with_type_params(["E"])
                .extends(TypeRef::parameterized(abstract_collection, [var("E")]))
                .implements(TypeRef::parameterized(list, [var("E")])),
        );
        registry.register(
            TypeDef::class("java.util.ArrayList")
                .with_type_params(["E"])
                .extends(TypeRef::parameterized(abstract_list, [var("E")]))
                .implements(TypeRef::parameterized(list, [var("E")]))
                .implements(plain(random_access))
                .implements(plain(cloneable))
                .implements(plain(serializable)),
        );
        registry.register(
            TypeDef::class("java.util.concurrent.atomic.AtomicReference")
                .with_type_params(["V"])
                .extends(plain(object))
                .implements(plain(serializable)),
        );

        for kind in PrimitiveKind::ALL {
            if kind != PrimitiveKind::Null {
                registry.register(TypeDef::primitive(kind));
            }
        }

        bind::<i32>(registry, "java.lang.Integer");
        bind::<i64>(registry, "java.lang.Long");
        bind::<i16>(registry, "java.lang.Short");
        bind::<i8>(registry, "java.lang.Byte");
        bind::<f32>(registry, "java.lang.Float");
        bind::<f64>(registry, "java.lang.Double");
        bind::<bool>(registry, "java.lang.Boolean");
        bind::<char>(registry, "java.lang.Character");
        bind::<String>(registry, "java.lang.String");
        bind::<&'static str>(registry, "java.lang.String");
    }

    fn bind<T: Any>(registry: &TypeRegistry, name: &str) {
        if let Some(id) = registry.lookup(name) {
            registry.bind_rust_type::<T>(id);
        }
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
