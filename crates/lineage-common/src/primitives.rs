//! Primitive types and their boxed counterparts.
//!
//! Hierarchy walks never start from a raw primitive: a primitive handle has
//! no ancestors or interfaces, so the parser swaps it for the boxed type
//! named here before walking.

use crate::names::NULL_TYPE_NAME;
use serde::Serialize;

/// Primitive kinds known to the lineage model, plus the null type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Short,
    Int,
    Long,
    Float,
    Double,
    Byte,
    Char,
    Boolean,
    Void,
    Null,
}

impl PrimitiveKind {
    /// Every kind, numbers first.
    pub const ALL: [PrimitiveKind; 10] = [
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Byte,
        Self::Char,
        Self::Boolean,
        Self::Void,
        Self::Null,
    ];

    /// Keyword spelling of the primitive (`int`, `boolean`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Boolean => "boolean",
            Self::Void => "void",
            Self::Null => NULL_TYPE_NAME,
        }
    }

    /// Canonical name of the boxed counterpart.
    ///
    /// The null type boxes to itself.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            Self::Short => "java.lang.Short",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
            Self::Byte => "java.lang.Byte",
            Self::Char => "java.lang.Character",
            Self::Boolean => "java.lang.Boolean",
            Self::Void => "java.lang.Void",
            Self::Null => NULL_TYPE_NAME,
        }
    }

    /// Whether a value of this kind may be absent.
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Void | Self::Null)
    }

    /// Look up a kind by primitive or boxed name, ignoring ASCII case.
    ///
    /// A blank name, or any spelling of `null`, is the null type.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(NULL_TYPE_NAME) {
            return Some(Self::Null);
        }
        Self::ALL.into_iter().find(|kind| {
            name.eq_ignore_ascii_case(kind.name()) || name.eq_ignore_ascii_case(kind.boxed_name())
        })
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
