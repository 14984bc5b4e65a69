//! Structural comparison of lineage trees.
//!
//! Two trees are compared node by node, positionally:
//!
//! - equal names: both wildcards give [`Compatibility::BothUnknown`];
//!   otherwise the child counts must agree and the children's results are
//!   folded together;
//! - different names: a wildcard on either side absorbs the difference
//!   ([`SourceUnknown`](Compatibility::SourceUnknown) /
//!   [`TargetUnknown`](Compatibility::TargetUnknown)); anything else is a
//!   [`TypeMismatchError`].
//!
//! The first error anywhere aborts the whole comparison.

use crate::diagnostics::TypeMismatchError;
use crate::node::TypeNode;
use crate::recursion::{DepthCounter, RecursionProfile};
use lineage_common::limits::{STACK_GROWTH, STACK_RED_ZONE};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Integer result of [`TypeNode::compare_to`] when the trees mismatch.
pub const MISMATCH: i32 = -1;

/// How closely two compatible trees agree.
///
/// Results fold with [`merge`](Compatibility::merge): the outcome records
/// whether a wildcard was seen on the source side, the target side, or
/// both, anywhere in the compared trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// Same shape, no wildcards involved.
    Exact = 0,
    /// A wildcard in the source stood in for a concrete target type.
    SourceUnknown = 1,
    /// A wildcard in the target stood in for a concrete source type.
    TargetUnknown = 2,
    /// Wildcards on both sides, or a wildcard compared with a wildcard.
    BothUnknown = 3,
}

impl Compatibility {
    /// Numeric code: 0, 1, 2 or 3.
    pub const fn code(self) -> i32 {
        self as i32
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Exact,
            1 => Self::SourceUnknown,
            2 => Self::TargetUnknown,
            _ => Self::BothUnknown,
        }
    }

    /// Combine two child results.
    ///
    /// `Exact` is the identity, equal inputs are absorbed, and
    /// `SourceUnknown` with `TargetUnknown` gives `BothUnknown`.
    pub const fn merge(self, other: Self) -> Self {
        Self::from_bits(self as u8 | other as u8)
    }

    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact)
    }

    /// Whether the source side contained a wildcard.
    pub const fn source_unknown(self) -> bool {
        self as u8 & 0b01 != 0
    }

    /// Whether the target side contained a wildcard.
    pub const fn target_unknown(self) -> bool {
        self as u8 & 0b10 != 0
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::SourceUnknown => "source unknown",
            Self::TargetUnknown => "target unknown",
            Self::BothUnknown => "both unknown",
        })
    }
}

/// Compare `source` against `target`.
pub fn compare_nodes(
    source: &TypeNode,
    target: &TypeNode,
) -> Result<Compatibility, TypeMismatchError> {
    StructuralComparator::new().compare(source, target)
}

/// Recursive comparator with a bounded nesting depth.
pub struct StructuralComparator {
    depth: DepthCounter,
}

impl Default for StructuralComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralComparator {
    pub fn new() -> Self {
        Self::with_profile(RecursionProfile::Comparison)
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self {
            depth: DepthCounter::with_profile(profile),
        }
    }

    pub fn compare(
        &mut self,
        source: &TypeNode,
        target: &TypeNode,
    ) -> Result<Compatibility, TypeMismatchError> {
        let result = self.compare_nested(source, target);
        match &result {
            Ok(compatibility) => {
                trace!(source = source.name(), %compatibility, "trees compatible")
            }
            Err(err) => {
                debug!(source = source.name(), target = target.name(), %err, "trees incompatible")
            }
        }
        result
    }

    fn compare_nested(
        &mut self,
        source: &TypeNode,
        target: &TypeNode,
    ) -> Result<Compatibility, TypeMismatchError> {
        if !self.depth.enter() {
            return Err(TypeMismatchError::nesting_too_deep(
                source.name(),
                target.name(),
                self.depth.max_depth(),
            ));
        }
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.compare_level(source, target)
        });
        self.depth.leave();
        result
    }

    fn compare_level(
        &mut self,
        source: &TypeNode,
        target: &TypeNode,
    ) -> Result<Compatibility, TypeMismatchError> {
        if source.name() != target.name() {
            return if source.is_top() {
                Ok(Compatibility::SourceUnknown)
            } else if target.is_top() {
                Ok(Compatibility::TargetUnknown)
            } else {
                Err(TypeMismatchError::names_differ(source.name(), target.name()))
            };
        }

        if source.is_top() {
            return Ok(Compatibility::BothUnknown);
        }

        if source.children().len() != target.children().len() {
            return Err(TypeMismatchError::child_counts_differ(source, target));
        }

        let mut total = Compatibility::Exact;
        for (index, (source_child, target_child)) in
            source.children().iter().zip(target.children()).enumerate()
        {
            let result = self.compare_nested(source_child, target_child)?;
            trace!(parent = source.name(), index, %result, "child compared");
            total = total.merge(result);
        }
        Ok(total)
    }
}

impl TypeNode {
    /// Compare this tree (the source) against `target`.
    ///
    /// An absent target is an error.
    pub fn compare<'t>(
        &self,
        target: impl Into<Option<&'t TypeNode>>,
    ) -> Result<Compatibility, TypeMismatchError> {
        match target.into() {
            Some(target) => compare_nodes(self, target),
            None => Err(TypeMismatchError::missing_target(self.name())),
        }
    }

    /// Integer form of [`compare`](TypeNode::compare): 0 to 3 on success,
    /// [`MISMATCH`] on any error.
    pub fn compare_to<'t>(&self, target: impl Into<Option<&'t TypeNode>>) -> i32 {
        self.compare(target).map_or(MISMATCH, Compatibility::code)
    }
}

#[cfg(test)]
#[path = "../tests/compare_tests.rs"]
mod tests;
