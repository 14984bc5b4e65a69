//! The `TypeOracle` trait: the only source of structural facts about types.
//!
//! The parser never introspects anything itself. Everything it knows about
//! a type (its name, generic placeholders, super-type and interfaces) comes
//! from an oracle, which keeps the core pure and lets any type system
//! (a reflection layer, a compiler's symbol table, the in-memory
//! [`TypeRegistry`](crate::TypeRegistry)) drive it.

use crate::types::TypeRef;
use lineage_common::PrimitiveKind;
use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

/// Answers structural questions about opaque type handles.
///
/// Implementations must be deterministic: asking the same question twice
/// yields the same answer. Handles are cheap copyable keys.
pub trait TypeOracle {
    type Handle: Copy + Eq + Hash + Debug;

    /// Canonical, fully qualified name of the type.
    fn canonical_name(&self, handle: Self::Handle) -> String;

    /// Declared type-parameter placeholders, in declaration order.
    fn declared_type_parameters(&self, handle: Self::Handle) -> Vec<String>;

    /// The type's super-type, if it has one.
    fn super_type(&self, handle: Self::Handle) -> Option<TypeRef<Self::Handle>>;

    /// Interfaces the type directly implements (or extends, for an
    /// interface), in declaration order.
    fn interfaces(&self, handle: Self::Handle) -> Vec<TypeRef<Self::Handle>>;

    /// Look up a real type by canonical name.
    fn resolve_name(&self, name: &str) -> Option<Self::Handle>;

    /// Whether `handle` is the universal top type every class descends from.
    fn is_universal_top(&self, handle: Self::Handle) -> bool;

    /// The primitive kind of a raw primitive handle, `None` for reference
    /// types.
    fn primitive_kind(&self, _handle: Self::Handle) -> Option<PrimitiveKind> {
        None
    }

    /// Runtime type of a value, if the oracle knows it.
    fn runtime_type(&self, _value: &dyn Any) -> Option<Self::Handle> {
        None
    }
}

impl<O: TypeOracle + ?Sized> TypeOracle for &O {
    type Handle = O::Handle;

    fn canonical_name(&self, handle: Self::Handle) -> String {
        (**self).canonical_name(handle)
    }

    fn declared_type_parameters(&self, handle: Self::Handle) -> Vec<String> {
        (**self).declared_type_parameters(handle)
    }

    fn super_type(&self, handle: Self::Handle) -> Option<TypeRef<Self::Handle>> {
        (**self).super_type(handle)
    }

    fn interfaces(&self, handle: Self::Handle) -> Vec<TypeRef<Self::Handle>> {
        (**self).interfaces(handle)
    }

    fn resolve_name(&self, name: &str) -> Option<Self::Handle> {
        (**self).resolve_name(name)
    }

    fn is_universal_top(&self, handle: Self::Handle) -> bool {
        (**self).is_universal_top(handle)
    }

    fn primitive_kind(&self, handle: Self::Handle) -> Option<PrimitiveKind> {
        (**self).primitive_kind(handle)
    }

    fn runtime_type(&self, value: &dyn Any) -> Option<Self::Handle> {
        (**self).runtime_type(value)
    }
}
