//! Style storage for one document

use super::Style;
use ahash::AHashMap;

/// Handle to a style stored in a [`StylePool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleId(pub u32);

/// Append-only style storage
///
/// Styles are never mutated once stored, so a [`StyleId`] handed out keeps
/// describing the same formatting for the lifetime of the document.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylePool {
    styles: Vec<Style>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index_map: AHashMap<u64, Vec<StyleId>>,
}

fn hash_style(style: &Style) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = ahash::AHasher::default();
    style.hash(&mut hasher);
    hasher.finish()
}

impl StylePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a style unconditionally and return its handle
    pub fn push(&mut self, style: Style) -> StyleId {
        let id = StyleId(self.styles.len() as u32);
        self.index_map.entry(hash_style(&style)).or_default().push(id);
        self.styles.push(style);
        id
    }

    /// Return the handle of an equal stored style, storing it first if absent
    pub fn intern(&mut self, style: Style) -> StyleId {
        let key = hash_style(&style);
        if let Some(ids) = self.index_map.get(&key) {
            for id in ids {
                if self.get(*id) == Some(&style) {
                    return *id;
                }
            }
        }
        self.push(style)
    }

    /// Get a style by handle
    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id.0 as usize)
    }

    /// Number of stored styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over all styles with their handles
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &Style)> {
        self.styles
            .iter()
            .enumerate()
            .map(|(i, s)| (StyleId(i as u32), s))
    }

    /// Rebuild the lookup index, e.g. after deserializing
    pub fn reindex(&mut self) {
        let mut index_map: AHashMap<u64, Vec<StyleId>> = AHashMap::with_capacity(self.styles.len());
        for (id, style) in self.iter() {
            index_map.entry(hash_style(style)).or_default().push(id);
        }
        self.index_map = index_map;
    }
}
