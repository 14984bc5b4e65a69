//! Guards for the three recursive walks in this crate.
//!
//! Hierarchy construction, tree comparison and signature parsing all recurse
//! over input supplied from outside the crate, so none of them may assume it
//! is finite or acyclic.
//!
//! - [`RecursionGuard`] keeps the keys on the active path and bounds both
//!   depth and total work. The parser keys it by the reference being
//!   expanded, so re-entering the same reference is a cycle.
//! - [`DepthCounter`] bounds depth only. Comparison and signature parsing
//!   revisit equal shapes all the time, so they have no cycle notion.
//!
//! Limits come in presets named by [`RecursionProfile`]:
//!
//! ```ignore
//! let guard = RecursionGuard::with_profile(RecursionProfile::HierarchyWalk);
//! ```
//!
//! In debug builds both guards panic when dropped with levels still entered.

use lineage_common::limits;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Named limit presets, read from [`lineage_common::limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Expanding a type's super-types, interfaces and arguments.
    ///
    /// depth = `MAX_HIERARCHY_DEPTH`, iterations = `MAX_HIERARCHY_NODES`
    HierarchyWalk,

    /// Positional comparison of two lineage trees. Depth only.
    Comparison,

    /// Nested `<...>` argument lists in a textual signature. Depth only.
    SignatureParse,

    /// Explicit limits, mostly for tests.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::HierarchyWalk => limits::MAX_HIERARCHY_DEPTH,
            Self::Comparison => limits::MAX_COMPARISON_DEPTH,
            Self::SignatureParse => limits::MAX_SIGNATURE_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    /// Upper bound on expansion attempts; `u32::MAX` for depth-only walks.
    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::HierarchyWalk => limits::MAX_HIERARCHY_NODES,
            Self::Comparison | Self::SignatureParse => u32::MAX,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Expand; call [`RecursionGuard::leave`] afterwards.
    Entered,
    /// The key is already being expanded further up the path.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

/// Active-path tracker for the hierarchy walk.
///
/// A key that was entered and left may be entered again, so a type reached
/// along two separate paths is expanded on both.
pub struct RecursionGuard<K: Hash + Eq + Clone> {
    active: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
    truncated: bool,
}

impl<K: Hash + Eq + Clone> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            active: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
            truncated: false,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Every call counts against the iteration limit, granted or not.
    pub fn enter(&mut self, key: &K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);
        if self.iterations > self.max_iterations {
            self.truncated = true;
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth {
            self.truncated = true;
            return RecursionResult::DepthExceeded;
        }
        if self.active.contains(key) {
            return RecursionResult::Cycle;
        }
        self.active.insert(key.clone());
        self.depth += 1;
        RecursionResult::Entered
    }

    pub fn leave(&mut self, key: &K) {
        let removed = self.active.remove(key);
        debug_assert!(removed, "RecursionGuard::leave without a matching enter");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of [`enter`](Self::enter) calls so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Whether a depth or iteration limit cut the walk short. Cycles do
    /// not count.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Clone> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.active.is_empty() {
            panic!("RecursionGuard dropped with {} keys still entered", self.active.len());
        }
    }
}

/// Depth-only guard.
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth())
    }

    /// `false` at the limit; the level is not entered and must not be left.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(self.depth > 0, "DepthCounter::leave at depth 0");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!("DepthCounter dropped at depth {}", self.depth);
        }
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
