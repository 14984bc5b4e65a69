//! Type references as reported by a [`TypeOracle`](crate::TypeOracle),
//! and the inputs accepted by the hierarchy parser.

use std::any::Any;
use std::fmt;

/// Argument list of a parameterized reference. Heap-allocated, since
/// arguments are themselves references.
pub type TypeArgs<H> = Vec<TypeRef<H>>;

/// A reference to a type as it appears in an `extends` / `implements`
/// clause or as a type argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef<H> {
    /// A non-parameterized class or interface.
    Plain(H),
    /// A generic type applied to actual arguments (`List<String>`).
    Parameterized { raw: H, args: TypeArgs<H> },
    /// A type variable or wildcard, known only by its spelling
    /// (`T`, `?`, `? extends Number`).
    Variable(String),
}

impl<H> TypeRef<H> {
    /// Build a parameterized reference.
    pub fn parameterized(raw: H, args: impl IntoIterator<Item = TypeRef<H>>) -> Self {
        Self::Parameterized {
            raw,
            args: args.into_iter().collect(),
        }
    }

    /// Build a type-variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Handle of the referenced class or interface, if any.
    ///
    /// For a parameterized reference this is the raw (un-applied) type.
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Plain(handle) | Self::Parameterized { raw: handle, .. } => Some(handle),
            Self::Variable(_) => None,
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Parameterized { .. })
    }
}

/// What to build a lineage tree for.
#[derive(Clone, Copy)]
pub enum Subject<'a, H> {
    /// A type handle. Primitive handles are swapped for their boxed type.
    Type(H),
    /// A value; the oracle reports its runtime type.
    Value(&'a dyn Any),
    /// An absent value. Produces the reserved null-type node.
    Null,
}

impl<'a, H> Subject<'a, H> {
    /// Subject for a concrete Rust value.
    pub fn value<T: Any>(value: &'a T) -> Self {
        Self::Value(value)
    }
}

impl<'a, H> From<Option<H>> for Subject<'a, H> {
    fn from(handle: Option<H>) -> Self {
        match handle {
            Some(handle) => Self::Type(handle),
            None => Self::Null,
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for Subject<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(handle) => f.debug_tuple("Type").field(handle).finish(),
            Self::Value(value) => f
                .debug_tuple("Value")
                .field(&(**value).type_id())
                .finish(),
            Self::Null => f.write_str("Null"),
        }
    }
}
