//! Filter synchronization
//!
//! Search input and visibility notifications both end in [`synchronize`],
//! which reads visibility through the provider, reassigns ordering keys over
//! the non-empty groups and refreshes every navigation link. Styles are only
//! written when they change, so a second pass with no visibility change in
//! between leaves the document untouched.
//!
//! [`synchronize`]: AlphabeticalFilter::synchronize

use std::collections::BTreeSet;

use super::{AlphabeticalFilter, VisibilityProvider};
use crate::dom::HostDocument;
use crate::models::{normalize, SyncReport};

impl<D: HostDocument, V: VisibilityProvider<D>> AlphabeticalFilter<D, V> {
    /// Apply a live search query, then resynchronize
    ///
    /// Matching is a case-insensitive substring test on the title; an empty
    /// query shows every item.
    pub fn search(&mut self, query: &str) -> SyncReport {
        self.query = normalize(query);

        for item in &self.items {
            let display = if item.matches_query(&self.query) { "" } else { "none" };
            self.set_style(&item.element, "display", display);
        }

        let report = self.synchronize();
        if self.query.is_empty() {
            log::info!("Search cleared, showing all items");
        } else {
            log::info!(
                "Search \"{}\": {} results, {} letters",
                self.query,
                report.visible_items,
                report.visible_letters.len()
            );
        }
        report
    }

    /// Recompute group ranks, ordering keys, header visibility and link state
    /// from current item visibility
    pub fn synchronize(&mut self) -> SyncReport {
        let started = self.doc.now_ms();

        let visible: Vec<bool> = self
            .items
            .iter()
            .map(|item| self.visibility.is_visible(&self.doc, &item.element))
            .collect();

        self.column_count = self.read_column_count();
        let group_ranks = self.apply_ordering(&visible);
        self.visible = visible;
        self.refresh_navigation();

        let report = SyncReport {
            visible_letters: group_ranks.keys().copied().collect(),
            group_ranks,
            visible_items: self.visible.iter().filter(|v| **v).count(),
            column_count: self.column_count,
        };

        self.timings
            .record_measurement("sync", (self.doc.now_ms() - started) as f32);
        log::debug!(
            "Synchronized: {} visible items in {} groups",
            report.visible_items,
            report.visible_letters.len()
        );
        self.last_report = Some(report.clone());
        report
    }

    /// Re-read the container's column count and apply it to visible headers
    ///
    /// Ordering keys and visibility are left alone.
    pub fn handle_resize(&mut self) -> u32 {
        let columns = self.read_column_count();
        if columns != self.column_count {
            log::info!("Updated letter headers for {} column(s) layout", columns);
        }
        self.column_count = columns;

        let span = format!("span {}", columns);
        for header in self.headers.values() {
            if self.doc.inline_style(header, "display") != "none" {
                self.set_style(header, "grid-column", &span);
            }
        }
        columns
    }

    /// Letters with at least one visible item at the last sync
    pub fn visible_letters(&self) -> BTreeSet<char> {
        self.items
            .iter()
            .zip(&self.visible)
            .filter(|(_, visible)| **visible)
            .map(|(item, _)| item.letter)
            .collect()
    }

    fn refresh_navigation(&mut self) {
        let visible_letters = self.visible_letters();
        let letters: Vec<char> = self.links.keys().copied().collect();

        for letter in letters {
            let target = self
                .items
                .iter()
                .zip(&self.visible)
                .filter(|(item, visible)| **visible && item.letter == letter)
                .find_map(|(item, _)| item.id.clone());
            self.apply_link_state(letter, visible_letters.contains(&letter), target);
        }
    }
}
