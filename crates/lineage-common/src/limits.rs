//! Centralized limits and thresholds for lineage tree construction.
//!
//! This module provides shared constants for recursion depths, work budgets
//! and stack growth used by the hierarchy parser, the structural comparator
//! and the signature parser. Centralizing these values:
//! - Prevents duplicate definitions with inconsistent values
//! - Keeps `RecursionProfile` presets and ad-hoc guards in agreement
//!
//! # Solver recursion limits
//!
//! The solver does not read these constants directly at call sites; it goes
//! through `lineage_solver::recursion::RecursionProfile`, which maps each
//! profile onto the values below.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum ancestor/interface nesting followed by a single hierarchy walk.
///
/// Well-formed hierarchies are shallow (a dozen levels is already unusual),
/// so hitting this limit means the oracle describes something pathological.
/// The parser stops expanding at this depth and emits a childless node.
///
/// # Example
///
/// ```text
/// // Ancestor chain the parser must follow, one level per `extends`:
/// class L256 extends L255 {}
/// class L255 extends L254 {}
/// // ... 256 levels ...
/// class L1 {}
/// ```
pub const MAX_HIERARCHY_DEPTH: u32 = 256;

/// Maximum number of nodes a single hierarchy walk may build.
///
/// Bounds total work independently of depth: wide diamond-shaped interface
/// graphs are expanded once per path, which can multiply quickly.
pub const MAX_HIERARCHY_NODES: u32 = 100_000;

/// Maximum nesting followed when comparing two trees.
///
/// Trees produced by the parser never exceed [`MAX_HIERARCHY_DEPTH`], but
/// callers may build or deserialize trees by hand.
pub const MAX_COMPARISON_DEPTH: u32 = 1_024;

/// Maximum `<...>` nesting accepted by the textual signature parser.
///
/// # Example
///
/// ```text
/// // Each `<` opens one level:
/// a.List<a.List<a.List<a.List< /* ... 128 levels ... */ >>>>
/// ```
pub const MAX_SIGNATURE_DEPTH: u32 = 128;

// =============================================================================
// Stack Growth
// =============================================================================

/// Remaining stack (in bytes) below which recursive steps grow the stack.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size (in bytes) of each freshly allocated stack segment.
pub const STACK_GROWTH: usize = 1024 * 1024;
