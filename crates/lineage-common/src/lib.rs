//! Common types and utilities for the lineage crates.
//!
//! This crate provides foundational pieces used across all lineage crates:
//! - Reserved names (`TOP_TYPE_NAME`, `NULL_TYPE_NAME`) and name rules
//! - The primitive table (`PrimitiveKind`)
//! - Recursion limits and stack growth thresholds

// Reserved names and placeholder detection
pub mod names;
pub use names::{NAMESPACE_SEPARATOR, NULL_TYPE_NAME, TOP_TYPE_NAME};

// Primitive -> boxed lookup
pub mod primitives;
pub use primitives::PrimitiveKind;

// Centralized limits and thresholds
pub mod limits;
