//! In-process refresh notifications.
//!
//! Every successful mutation bumps the generation of its topic. A loaded list
//! view remembers the generation it last fetched at and is stale while the
//! bus is ahead of it.

use std::collections::HashMap;

use crate::domain::types::{CategoryKind, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Entries(EntityKind),
    Categories(CategoryKind),
}

#[derive(Debug, Default)]
pub struct RefreshBus {
    generations: HashMap<Topic, u64>,
}

impl RefreshBus {
    pub fn publish(&mut self, topic: Topic) {
        *self.generations.entry(topic).or_insert(0) += 1;
        log::debug!("Published refresh for {topic:?}");
    }

    pub fn generation(&self, topic: Topic) -> u64 {
        self.generations.get(&topic).copied().unwrap_or(0)
    }
}

/// Cached result of a `list` call.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    loaded: bool,
    seen_generation: u64,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            seen_generation: 0,
        }
    }
}

impl<T> ListView<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Loaded and behind the bus.
    pub fn is_stale(&self, generation: u64) -> bool {
        self.loaded && self.seen_generation < generation
    }

    /// Store a fetch result. A failed fetch leaves the view loaded but empty.
    pub fn fill(&mut self, items: Option<Vec<T>>, generation: u64) {
        self.items = items.unwrap_or_default();
        self.loaded = true;
        self.seen_generation = generation;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_are_independent() {
        let mut bus = RefreshBus::default();
        bus.publish(Topic::Entries(EntityKind::Service));
        bus.publish(Topic::Entries(EntityKind::Service));

        assert_eq!(bus.generation(Topic::Entries(EntityKind::Service)), 2);
        assert_eq!(bus.generation(Topic::Entries(EntityKind::Project)), 0);
        assert_eq!(bus.generation(Topic::Categories(CategoryKind::Service)), 0);
    }

    #[test]
    fn only_loaded_views_go_stale() {
        let mut view: ListView<u8> = ListView::default();
        assert!(!view.is_stale(1));

        view.fill(Some(vec![1]), 0);
        assert!(view.is_stale(1));

        view.fill(None, 1);
        assert!(!view.is_stale(1));
        assert!(view.is_loaded());
        assert!(view.items().is_empty());
    }
}
