// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stateful drill-down over the hierarchy.
//!
//! After every query the navigator drills into single-child levels on its
//! own, until a level has zero or several children or the section list is
//! reached. The number of automatic steps is capped, and a path already
//! visited during one refresh is never entered twice.

use crate::error::CoreError;
use crate::hierarchy::{HierarchyContent, HierarchyView};
use mappatura_domain::{Level, Scope};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default limit on automatic drill-downs per refresh.
///
/// The hierarchy is four levels deep, so well-formed data never needs more
/// than four steps.
pub const DEFAULT_MAX_AUTO_SKIP: usize = 8;

/// Anything that can answer hierarchy queries.
pub trait HierarchySource {
    /// Returns what the level at `scope` shows.
    ///
    /// # Errors
    ///
    /// Returns an error if the scope does not resolve.
    fn query(&mut self, scope: &Scope) -> Result<HierarchyView, CoreError>;
}

/// Current path and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorState {
    /// The path; deeper components are unset.
    pub path: Scope,
    /// The level being shown.
    pub level: Level,
}

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigationAction {
    /// Re-query the current path.
    Refresh,
    /// Enter a child of the current level.
    DrillDown {
        /// The child's path.
        scope: Scope,
    },
    /// Leave the current level.
    Back,
}

/// Drill-down controller.
#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavigatorState,
    view: Option<HierarchyView>,
    max_auto_skip: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AUTO_SKIP)
    }
}

impl Navigator {
    /// Creates a navigator at the root.
    #[must_use]
    pub const fn new(max_auto_skip: usize) -> Self {
        Self::at(Scope::root(), max_auto_skip)
    }

    /// Creates a navigator positioned at `path`, not yet refreshed.
    #[must_use]
    pub const fn at(path: Scope, max_auto_skip: usize) -> Self {
        Self {
            state: NavigatorState {
                path,
                level: Level::Region,
            },
            view: None,
            max_auto_skip,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &NavigatorState {
        &self.state
    }

    /// Returns the last loaded view.
    #[must_use]
    pub const fn view(&self) -> Option<&HierarchyView> {
        self.view.as_ref()
    }

    /// Returns the auto-skip limit.
    #[must_use]
    pub const fn max_auto_skip(&self) -> usize {
        self.max_auto_skip
    }

    /// Re-queries the current path, then skips single-child levels.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails; the state is left unchanged.
    pub fn refresh<S: HierarchySource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<&HierarchyView, CoreError> {
        let mut view: HierarchyView = source.query(&self.state.path)?;
        let mut visited: HashSet<Scope> = HashSet::from([view.scope]);
        let mut skipped: usize = 0;

        while let Some(child) = view.only_child() {
            if skipped >= self.max_auto_skip {
                warn!(
                    scope = ?view.scope,
                    limit = self.max_auto_skip,
                    "Auto-skip limit reached"
                );
                break;
            }
            if !visited.insert(child) {
                warn!(scope = ?child, "Auto-skip revisited a path; stopping");
                break;
            }
            debug!(from = ?view.scope, to = ?child, "Auto-skipping single-child level");
            view = source.query(&child)?;
            skipped += 1;
        }

        Ok(self.show(view))
    }

    /// Enters a child of the current level, clearing deeper components.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `child` is not below the current path,
    /// or any query error.
    pub fn drill_down<S: HierarchySource + ?Sized>(
        &mut self,
        source: &mut S,
        child: Scope,
    ) -> Result<&HierarchyView, CoreError> {
        if child.depth() <= self.state.path.depth() || !self.state.path.contains(&child) {
            return Err(CoreError::validation(
                "scope",
                "drill-down target is not below the current path",
            ));
        }
        let previous: NavigatorState = self.state;
        self.state.path = child;
        let refreshed: Result<(), CoreError> = self.refresh(source).map(|_| ());
        if let Err(e) = refreshed {
            self.state = previous;
            return Err(e);
        }
        self.current()
    }

    /// Clears the deepest path component.
    ///
    /// Levels that were skipped automatically on the way down are skipped on
    /// the way up as well, so `back` never lands on a level that would
    /// immediately bounce forward again. Returns `false` at the root.
    ///
    /// # Errors
    ///
    /// Returns any query error; the state is left unchanged.
    pub fn back<S: HierarchySource + ?Sized>(&mut self, source: &mut S) -> Result<bool, CoreError> {
        let Some(mut path) = self.state.path.parent() else {
            return Ok(false);
        };
        let mut view: HierarchyView = source.query(&path)?;
        while view.auto_skip {
            let Some(parent) = path.parent() else {
                break;
            };
            path = parent;
            view = source.query(&path)?;
        }
        self.show(view);
        Ok(true)
    }

    /// Applies a navigation request and returns the resulting view.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying action.
    pub fn apply<S: HierarchySource + ?Sized>(
        &mut self,
        source: &mut S,
        action: NavigationAction,
    ) -> Result<&HierarchyView, CoreError> {
        match action {
            NavigationAction::Refresh => self.refresh(source),
            NavigationAction::DrillDown { scope } => self.drill_down(source, scope),
            NavigationAction::Back => {
                if self.back(source)? {
                    self.current()
                } else {
                    self.refresh(source)
                }
            }
        }
    }

    /// Filters the loaded nodes or sections by substring, without querying.
    #[must_use]
    pub fn search(&self, needle: &str) -> HierarchyContent {
        self.view.as_ref().map_or_else(
            || HierarchyContent::Nodes { nodes: Vec::new() },
            |view| view.content.filter(needle),
        )
    }

    fn show(&mut self, view: HierarchyView) -> &HierarchyView {
        self.state = NavigatorState {
            path: view.scope,
            level: view.level,
        };
        self.view.insert(view)
    }

    fn current(&self) -> Result<&HierarchyView, CoreError> {
        self.view
            .as_ref()
            .ok_or_else(|| CoreError::Repository(String::from("navigator has no view loaded")))
    }
}
