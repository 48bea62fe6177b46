// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mappatura_domain::{Assignment, Scope};

/// A change announced by the assignment store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new assignment was written.
    Assigned(Assignment),
    /// An assignment was deleted.
    Removed(Assignment),
    /// Aggregates related to the scope must be recomputed on next read.
    CacheInvalidated(Scope),
}

/// Receives store events synchronously, before the write returns.
pub trait StoreListener: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: &StoreEvent);
}
