//! Type lineage trees and wildcard-aware structural comparison.
//!
//! This crate re-exports the public surface of the workspace:
//!
//! - [`lineage_common`]: reserved names, name rules, primitives, limits
//! - [`lineage_solver`]: oracles, the hierarchy parser, the comparator
//!
//! plus [`tracing_config`] for installing a log subscriber in binaries,
//! tests and benches.
//!
//! ```ignore
//! use lineage::{Subject, TypeRegistry, parse, parse_signature};
//!
//! let registry = TypeRegistry::with_core_types();
//! let list = registry.lookup("java.util.ArrayList").unwrap();
//! let tree = parse(&registry, Subject::Type(list));
//! let expected = parse_signature("java.util.ArrayList<?, ...>")?;
//! assert_eq!(tree.compare_to(&expected), 3);
//! ```

pub mod tracing_config;

pub use lineage_common::{
    NAMESPACE_SEPARATOR, NULL_TYPE_NAME, PrimitiveKind, TOP_TYPE_NAME, limits, names,
};
pub use lineage_solver::{
    CachedOracle, Compatibility, DepthCounter, ExclusionFilters, FilterKind, HierarchyParser,
    LineageError, MISMATCH, NamePattern, RecursionGuard, RecursionProfile, RecursionResult,
    SignatureError, StructuralComparator, Subject, TypeArgs, TypeDef, TypeDefId, TypeDefKind,
    TypeMismatchError, TypeNode, TypeOracle, TypeRef, TypeRegistry, compare_nodes, parse,
    parse_signature, parse_strict, parse_with_filters,
};

use tracing::debug_span;

/// Check that `subject`'s lineage matches the textual `signature`.
///
/// The subject is parsed with `filters` (none when `None`) and compared as
/// the source against the parsed signature as the target. A malformed
/// signature and a structural mismatch are both errors.
pub fn check_signature<O: TypeOracle>(
    oracle: &O,
    subject: Subject<'_, O::Handle>,
    filters: Option<&ExclusionFilters>,
    signature: &str,
) -> Result<Compatibility, LineageError> {
    let _span = debug_span!("check_signature", signature).entered();
    let expected = parse_signature(signature)?;
    let actual = parse_with_filters(oracle, subject, filters);
    Ok(actual.compare(&expected)?)
}
