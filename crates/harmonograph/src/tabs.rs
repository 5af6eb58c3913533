//! Tab arena - a stable-id collection of toggleable pendulum pairs.
//!
//! Each tab contributes one x-term and one y-term to the composite
//! signal while active. Tabs carry identifiers that never shift when
//! neighbors are removed, and removal is two-phase: the tab is marked
//! removed immediately (dropping out of `active_terms`) and the slot is
//! compacted on the next signal rebuild, so no iterator held during
//! event processing is ever invalidated.
//!
//! Invariant: at least one live, active tab exists at all times. The
//! mutators refuse any change that would break it.

use serde::{Deserialize, Serialize};

use crate::pendulum::{Axis, Param, Pendulum};

/// Stable tab identifier, never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TabId(pub u32);

/// One pendulum pair with its toggle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub name: String,
    pub active: bool,
    pub x: Pendulum,
    pub y: Pendulum,
    #[serde(skip)]
    removed: bool,
}

#[derive(Debug, Clone)]
pub struct TabArena {
    tabs: Vec<Tab>,
    next_id: u32,
}

impl TabArena {
    /// Arena seeded with one default tab.
    pub fn new() -> Self {
        let mut arena = Self { tabs: Vec::new(), next_id: 1 };
        arena.add();
        arena
    }

    /// Add a tab with default pendulums; returns its id.
    pub fn add(&mut self) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        self.tabs.push(Tab {
            id,
            name: format!("tab {}", id.0),
            active: true,
            x: Pendulum::default_x(),
            y: Pendulum::default_y(),
            removed: false,
        });
        id
    }

    /// Mark a tab removed. Refused (returns false) for unknown ids and
    /// for the last remaining active tab.
    pub fn remove(&mut self, id: TabId) -> bool {
        if !self.can_disable(id) {
            return false;
        }
        match self.tab_mut(id) {
            Some(tab) => {
                tab.removed = true;
                tab.active = false;
                true
            }
            None => false,
        }
    }

    /// Toggle a tab's contribution to the signal. Deactivating the last
    /// active tab is refused.
    pub fn set_active(&mut self, id: TabId, active: bool) -> bool {
        if !active && !self.can_disable(id) {
            return false;
        }
        match self.tab_mut(id) {
            Some(tab) => {
                tab.active = active;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, id: TabId) -> bool {
        match self.get(id) {
            Some(tab) => {
                let target = !tab.active;
                self.set_active(id, target)
            }
            None => false,
        }
    }

    /// Set one slider parameter, clamped to its configured range.
    pub fn set_param(&mut self, id: TabId, axis: Axis, param: Param, value: f64) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                match axis {
                    Axis::X => tab.x.set(param, value),
                    Axis::Y => tab.y.set(param, value),
                }
                true
            }
            None => false,
        }
    }

    /// Bulk-set both terms of a tab (preset recall).
    pub fn set_terms(&mut self, id: TabId, x: Pendulum, y: Pendulum) -> bool {
        match self.tab_mut(id) {
            Some(tab) => {
                tab.x = x;
                tab.y = y;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id && !t.removed)
    }

    /// Live (not-yet-compacted-out) tabs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter().filter(|t| !t.removed)
    }

    /// Per-axis term lists for the active tabs, in tab order. This is
    /// what the composite signal rebuild consumes.
    pub fn active_terms(&self) -> (Vec<Pendulum>, Vec<Pendulum>) {
        let mut x_terms = Vec::new();
        let mut y_terms = Vec::new();
        for tab in self.tabs.iter().filter(|t| t.active && !t.removed) {
            x_terms.push(tab.x);
            y_terms.push(tab.y);
        }
        (x_terms, y_terms)
    }

    /// Drop removed slots. Called at rebuild time, never mid-iteration.
    pub fn compact(&mut self) {
        self.tabs.retain(|t| !t.removed);
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_count(&self) -> usize {
        self.tabs.iter().filter(|t| t.active && !t.removed).count()
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id && !t.removed)
    }

    /// Whether `id` may stop contributing without emptying the signal.
    fn can_disable(&self, id: TabId) -> bool {
        self.tabs
            .iter()
            .any(|t| t.id != id && t.active && !t.removed)
            || !self.get(id).is_some_and(|t| t.active)
    }
}

impl Default for TabArena {
    fn default() -> Self {
        Self::new()
    }
}
