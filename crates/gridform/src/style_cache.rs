//! Per-document style deduplication

use ahash::AHashMap;
use gridform_core::style::{Style, StyleId, StylePool};

use crate::style::StyleDescriptor;

/// Hands out one stored style per distinct [`StyleDescriptor::style_key`].
///
/// The cache owns the style pool of the document being built; styles are
/// never changed after they are stored, so a handle written into a cell
/// keeps its look. The pool moves into the finished workbook.
#[derive(Debug, Default)]
pub struct StyleCache {
    pool: StylePool,
    base: Style,
    by_key: AHashMap<String, StyleId>,
}

impl StyleCache {
    /// Cache whose styles start from the default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache whose styles start from `base`
    pub fn with_base_style(base: Style) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Handle for the descriptor's look, storing a new style on first use
    pub fn get_style(&mut self, descriptor: &StyleDescriptor) -> StyleId {
        let key = descriptor.style_key();
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let id = self.pool.push(descriptor.apply_to(&self.base));
        log::trace!("stored style {} for key {key}", id.0);
        self.by_key.insert(key, id);
        id
    }

    /// Store a style without consulting the cache.
    ///
    /// Do not call in a loop: every call stores another style for the
    /// lifetime of the document.
    pub fn new_style(&mut self, descriptor: &StyleDescriptor) -> StyleId {
        self.pool.push(descriptor.apply_to(&self.base))
    }

    /// Number of styles created through [`get_style`](Self::get_style)
    pub fn created(&self) -> usize {
        self.by_key.len()
    }

    /// Resolve a handle returned by this cache
    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.pool.get(id)
    }

    /// The style every descriptor is overlaid on
    pub fn base_style(&self) -> &Style {
        &self.base
    }

    /// Release the stored styles
    pub fn into_pool(self) -> StylePool {
        self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridform_core::style::Color;

    #[test]
    fn test_equal_descriptors_share_a_handle() {
        let mut cache = StyleCache::new();
        let a = cache.get_style(&StyleDescriptor::new().bold(true).background(Color::RED));
        let b = cache.get_style(&StyleDescriptor::new().background(Color::RED).bold(true));
        let c = cache.get_style(&StyleDescriptor::new().bold(true));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.created(), 2);
    }

    #[test]
    fn test_new_style_bypasses_cache() {
        let mut cache = StyleCache::new();
        let d = StyleDescriptor::new().wrap(true);
        let cached = cache.get_style(&d);
        let one_off = cache.new_style(&d);

        assert_ne!(cached, one_off);
        assert_eq!(cache.created(), 1);
        assert_eq!(cache.into_pool().len(), 2);
    }

    #[test]
    fn test_base_style_is_cloned() {
        let base = Style::new().font_name("Arial");
        let mut cache = StyleCache::with_base_style(base.clone());
        let id = cache.get_style(&StyleDescriptor::new().bold(true));

        let style = cache.style(id).unwrap();
        assert_eq!(style.font.name, "Arial");
        assert!(style.font.bold);
        assert_eq!(cache.base_style(), &base);
    }
}
