//! Memoizing oracle wrapper.
//!
//! Name resolution is the only oracle query the parser repeats for the same
//! input many times (every declared parameter and every plain interface goes
//! through it), and for reflection-backed oracles it is also the expensive
//! one. [`CachedOracle`] remembers both hits and misses.

use crate::oracle::TypeOracle;
use crate::types::TypeRef;
use dashmap::DashMap;
use lineage_common::PrimitiveKind;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Wraps an oracle and caches [`resolve_name`](TypeOracle::resolve_name).
///
/// All other queries are forwarded unchanged. Safe to share between threads
/// when the inner oracle is.
pub struct CachedOracle<O: TypeOracle> {
    inner: O,
    resolved: DashMap<String, Option<O::Handle>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<O: TypeOracle> CachedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            resolved: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups forwarded to the inner oracle.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cached names, resolved or not.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Forget every cached answer. Counters are kept.
    pub fn clear(&self) {
        self.resolved.clear();
    }
}

impl<O: TypeOracle> TypeOracle for CachedOracle<O> {
    type Handle = O::Handle;

    fn canonical_name(&self, handle: Self::Handle) -> String {
        self.inner.canonical_name(handle)
    }

    fn declared_type_parameters(&self, handle: Self::Handle) -> Vec<String> {
        self.inner.declared_type_parameters(handle)
    }

    fn super_type(&self, handle: Self::Handle) -> Option<TypeRef<Self::Handle>> {
        self.inner.super_type(handle)
    }

    fn interfaces(&self, handle: Self::Handle) -> Vec<TypeRef<Self::Handle>> {
        self.inner.interfaces(handle)
    }

    fn resolve_name(&self, name: &str) -> Option<Self::Handle> {
        if let Some(cached) = self.resolved.get(name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *cached;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let resolved = self.inner.resolve_name(name);
        trace!(%name, found = resolved.is_some(), "resolve_name cache miss");
        self.resolved.insert(name.to_string(), resolved);
        resolved
    }

    fn is_universal_top(&self, handle: Self::Handle) -> bool {
        self.inner.is_universal_top(handle)
    }

    fn primitive_kind(&self, handle: Self::Handle) -> Option<PrimitiveKind> {
        self.inner.primitive_kind(handle)
    }

    fn runtime_type(&self, value: &dyn Any) -> Option<Self::Handle> {
        self.inner.runtime_type(value)
    }
}
