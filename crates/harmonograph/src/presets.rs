//! Preset snapshots of tab parameters.
//!
//! A preset captures one tab's pendulum pair for later recall. The book
//! keys entries by an auto-incrementing id and defines the serialized
//! schema; where the book lives on disk (and in which format) is the
//! host's business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pendulum::Pendulum;
use crate::tabs::Tab;

/// A saved pendulum pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabPreset {
    pub name: String,
    pub x: Pendulum,
    pub y: Pendulum,
}

impl TabPreset {
    pub fn new(name: impl Into<String>, x: Pendulum, y: Pendulum) -> Self {
        Self { name: name.into(), x, y }
    }

    /// Snapshot a live tab.
    pub fn from_tab(tab: &Tab) -> Self {
        Self { name: tab.name.clone(), x: tab.x, y: tab.y }
    }
}

/// Ordered collection of presets with auto-incrementing ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetBook {
    #[serde(default)]
    next_id: u32,
    #[serde(default)]
    entries: BTreeMap<u32, TabPreset>,
}

impl PresetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a preset and return its assigned id. Ids count up from 1
    /// and survive deletions (a removed id is never handed out again).
    pub fn save(&mut self, preset: TabPreset) -> u32 {
        let floor = self.entries.keys().next_back().map_or(0, |&k| k);
        let id = self.next_id.max(floor) + 1;
        self.next_id = id;
        self.entries.insert(id, preset);
        id
    }

    pub fn get(&self, id: u32) -> Option<&TabPreset> {
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<TabPreset> {
        self.entries.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &TabPreset)> {
        self.entries.iter().map(|(&id, p)| (id, p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(name: &str) -> TabPreset {
        TabPreset::new(name, Pendulum::default_x(), Pendulum::default_y())
    }

    #[test]
    fn ids_auto_increment_from_one() {
        let mut book = PresetBook::new();
        assert_eq!(book.save(preset("a")), 1);
        assert_eq!(book.save(preset("b")), 2);
        assert_eq!(book.save(preset("c")), 3);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut book = PresetBook::new();
        book.save(preset("a"));
        let b = book.save(preset("b"));
        book.remove(b);
        assert_eq!(book.save(preset("c")), 3);
    }

    #[test]
    fn recall_round_trips() {
        let mut book = PresetBook::new();
        let saved = preset("figure-eight");
        let id = book.save(saved.clone());
        assert_eq!(book.get(id), Some(&saved));
        assert_eq!(book.get(999), None);
    }

    #[test]
    fn deserialized_book_keeps_counting() {
        // A book whose next_id field defaulted to 0 (older file) still
        // allocates past its highest existing key.
        let mut book = PresetBook::new();
        book.save(preset("a"));
        book.save(preset("b"));

        let mut restored = PresetBook {
            next_id: 0,
            entries: book.entries.clone(),
        };
        assert_eq!(restored.save(preset("c")), 3);
    }
}
