// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment store, hierarchy index and navigation.
//!
//! Writes go through [`AssignmentStore`], which talks to storage only via the
//! [`MappingRepository`] trait and announces every change as a
//! [`StoreEvent`]. Reads go through [`HierarchyIndex`], which memoizes
//! aggregate counts in an [`AggregateCache`] until the store emits an
//! explicit invalidation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod bulk;
mod cache;
mod cancel;
mod command;
mod engine;
mod error;
mod events;
mod hierarchy;
mod navigator;
mod repository;
mod selection;
mod store;

#[cfg(test)]
mod tests;

pub use bulk::{BulkItem, BulkItemStatus, BulkReport};
pub use cache::AggregateCache;
pub use cancel::Cancellation;
pub use command::{AssignOutcome, Command, CommandOutcome};
pub use engine::{HeldAssignment, MappingEngine, RepresentativeSummary};
pub use error::CoreError;
pub use events::{StoreEvent, StoreListener};
pub use hierarchy::{
    Aggregates, Breadcrumb, BuildingView, HierarchyContent, HierarchyIndex, HierarchyNode,
    HierarchyView, MappingSnapshot, SectionRow, SlotView,
};
pub use navigator::{
    DEFAULT_MAX_AUTO_SKIP, HierarchySource, NavigationAction, Navigator, NavigatorState,
};
pub use repository::{MappingRepository, MemoryRepository};
pub use selection::{AssignmentGateway, BulkOrchestrator, CommitResult, SelectionState};
pub use store::AssignmentStore;
