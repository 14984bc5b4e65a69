//! Type Lineage Solver
//!
//! Builds a canonical tree describing a type's full ancestry (declared
//! type parameters, implemented interfaces, super-types) and compares two
//! such trees structurally, tolerating wildcards.
//!
//! It uses:
//!
//! - **`TypeOracle`**: the only source of structural facts about types
//! - **`TypeNode`**: the immutable lineage tree
//! - **Recursion guards**: bounded walks over cyclic or very deep hierarchies
//!
//! Key properties:
//! - Parsing never fails; unknown names degrade to the `?` wildcard
//! - Comparison is positional and folds wildcard outcomes into a 0..=3 code
//! - Exclusion filters prune branches while a tree is being built
pub mod cache;
pub mod compare;
mod diagnostics;
pub mod filters;
pub mod node;
pub mod oracle;
pub mod parser;
pub mod recursion;
pub mod registry;
pub mod signature;
pub mod types;

pub use cache::CachedOracle;
pub use compare::{Compatibility, MISMATCH, StructuralComparator, compare_nodes};
pub use diagnostics::{LineageError, SignatureError, TypeMismatchError};
pub use filters::{ExclusionFilters, FilterKind, NamePattern};
pub use node::TypeNode;
pub use oracle::TypeOracle;
pub use parser::{HierarchyParser, parse, parse_strict, parse_with_filters};
pub use recursion::{DepthCounter, RecursionGuard, RecursionProfile, RecursionResult};
pub use registry::{TypeDef, TypeDefId, TypeDefKind, TypeRegistry};
pub use signature::parse_signature;
pub use types::{Subject, TypeArgs, TypeRef};
