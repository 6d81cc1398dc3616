//! Item collection
//!
//! Scans item elements in document order and keeps those whose title yields
//! a letter. Reads only; nothing in the document changes here.

use super::{AlphabeticalFilter, VisibilityProvider};
use crate::dom::HostDocument;
use crate::models::{FilterConfig, Item};

/// Collect every groupable item, in document order
///
/// Items without a title element, or whose title contains no ASCII letter,
/// are skipped with a warning.
pub fn collect_items<D: HostDocument>(doc: &D, config: &FilterConfig) -> Vec<Item<D::Node>> {
    let mut items = Vec::new();

    for (index, element) in doc.query_all(&config.item_selector).into_iter().enumerate() {
        let Some(title_element) = doc.query_within(&element, &config.title_selector) else {
            log::warn!("No title element found for item at index {}", index);
            continue;
        };

        let title = doc.text(&title_element);
        match Item::new(element, &title) {
            Some(item) => items.push(item),
            None => log::warn!("Could not extract first letter from: \"{}\"", title.trim()),
        }
    }

    items
}

impl<D: HostDocument, V: VisibilityProvider<D>> AlphabeticalFilter<D, V> {
    pub(crate) fn collect(&mut self) {
        self.items = collect_items(&self.doc, &self.config);
        self.letters = self.items.iter().map(|item| item.letter).collect();
        log::info!(
            "Found {} items with {} unique letters",
            self.items.len(),
            self.letters.len()
        );
    }
}
