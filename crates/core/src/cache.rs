// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::events::{StoreEvent, StoreListener};
use crate::hierarchy::Aggregates;
use mappatura_domain::Scope;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Memoized aggregate counters keyed by scope.
///
/// Entries stay valid until an explicit invalidation arrives, so counts may
/// lag behind assignment writes. Only [`StoreEvent::CacheInvalidated`]
/// evicts entries; the cache ignores the other store events.
#[derive(Debug, Default)]
pub struct AggregateCache {
    entries: Mutex<HashMap<Scope, Aggregates>>,
}

impl AggregateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Scope, Aggregates>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached counters for a scope.
    #[must_use]
    pub fn get(&self, scope: &Scope) -> Option<Aggregates> {
        self.lock().get(scope).copied()
    }

    /// Returns the cached counters for a scope, computing them on a miss.
    pub fn get_or_insert_with<F>(&self, scope: Scope, compute: F) -> Aggregates
    where
        F: FnOnce() -> Aggregates,
    {
        if let Some(hit) = self.get(&scope) {
            return hit;
        }
        let computed: Aggregates = compute();
        self.lock().insert(scope, computed);
        computed
    }

    /// Drops every entry whose scope contains or is contained by `scope`.
    ///
    /// Returns the number of evicted entries.
    pub fn invalidate(&self, scope: &Scope) -> usize {
        let mut entries = self.lock();
        let before: usize = entries.len();
        entries.retain(|cached, _| !cached.is_related(scope));
        let evicted: usize = before - entries.len();
        debug!(?scope, evicted, "Invalidated aggregate cache");
        evicted
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the number of cached scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl StoreListener for AggregateCache {
    fn on_event(&self, event: &StoreEvent) {
        if let StoreEvent::CacheInvalidated(scope) = event {
            self.invalidate(scope);
        }
    }
}
