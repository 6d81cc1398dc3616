//! Alphabetical grouping and filtering engine
//!
//! One [`AlphabeticalFilter`] decorates one glossary list. Initialization
//! runs the stages in order:
//!
//! 1. `collector`: read item elements and their leading letters
//! 2. `layout`: sort once, tag anchors, insert headers and spacers
//! 3. `navigation`: build the 26 letter links
//! 4. `sync`: compute visibility, ordering keys and link state
//!
//! After that only `sync` runs, driven by search input, visibility
//! notifications and viewport changes. Items are never moved again after the
//! initial sort; visual order is carried by ordering keys so the engine does
//! not fight an external filtering library over DOM positions.

pub mod collector;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod sync;
pub mod visibility;

pub use collector::collect_items;
pub use error::FilterError;
pub use layout::{group_stride, ordering_key, GROUP_STRIDE};
pub use navigation::{LinkAction, NavLink};
pub use visibility::{InlineVisibility, RenderedVisibility, SubscriptionId, VisibilityBus, VisibilityProvider};

use std::collections::{BTreeMap, BTreeSet};

use crate::dom::HostDocument;
use crate::models::{FilterConfig, FilterStats, Item, SyncReport};
use crate::utils::PerformanceMonitor;

/// Attribute written on anchors and hidden-letter elements
pub const LETTER_ATTR: &str = "data-letter";
/// Attribute identifying generated navigation links
pub const LINK_ATTR: &str = "data-letter-link";
pub const HEADER_ATTR: &str = "data-letter-header";
pub const SPACER_ATTR: &str = "data-letter-spacer";

/// The engine instance for one glossary list
#[derive(Debug)]
pub struct AlphabeticalFilter<D: HostDocument, V = RenderedVisibility> {
    pub(crate) doc: D,
    pub(crate) visibility: V,
    pub(crate) config: FilterConfig,
    /// Items in group order once layout has run
    pub(crate) items: Vec<Item<D::Node>>,
    pub(crate) letters: BTreeSet<char>,
    pub(crate) container: Option<D::Node>,
    pub(crate) headers: BTreeMap<char, D::Node>,
    pub(crate) spacers: BTreeMap<char, D::Node>,
    pub(crate) links: BTreeMap<char, NavLink<D::Node>>,
    /// Visibility of `items`, index-aligned, from the last sync
    pub(crate) visible: Vec<bool>,
    /// Normalized search query
    pub(crate) query: String,
    pub(crate) column_count: u32,
    pub(crate) last_report: Option<SyncReport>,
    pub(crate) timings: PerformanceMonitor,
}

impl<D: HostDocument> AlphabeticalFilter<D, RenderedVisibility> {
    /// Engine that treats rendered visibility as the source of truth
    pub fn new(doc: D, config: FilterConfig) -> Result<Self, FilterError> {
        let visibility = RenderedVisibility::new(config.hidden_marker_selector.clone());
        Self::with_visibility(doc, config, visibility)
    }
}

impl<D: HostDocument, V: VisibilityProvider<D>> AlphabeticalFilter<D, V> {
    pub fn with_visibility(doc: D, config: FilterConfig, visibility: V) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            column_count: config.default_column_count,
            doc,
            visibility,
            config,
            items: Vec::new(),
            letters: BTreeSet::new(),
            container: None,
            headers: BTreeMap::new(),
            spacers: BTreeMap::new(),
            links: BTreeMap::new(),
            visible: Vec::new(),
            query: String::new(),
            last_report: None,
            timings: PerformanceMonitor::new(),
        })
    }

    /// Run every initialization stage, then one sync pass
    pub fn init(&mut self) -> Result<FilterStats, FilterError> {
        let started = self.doc.now_ms();

        self.collect();
        self.arrange_groups()?;
        self.build_navigation()?;
        if self.search_field().is_none() {
            log::warn!("Search field not found, search functionality disabled");
        }
        self.synchronize();

        let elapsed = (self.doc.now_ms() - started) as f32;
        self.timings.record_measurement("init", elapsed);
        log::info!(
            "Alphabetical filter initialized: {} items, {} letters ({:.1}ms)",
            self.items.len(),
            self.letters.len(),
            elapsed
        );
        Ok(self.stats())
    }

    /// Discard all state and generated markup, clear the search field and
    /// initialize again
    pub fn refresh(&mut self) -> Result<FilterStats, FilterError> {
        log::info!("Refreshing alphabetical filter");

        for node in self.headers.values().chain(self.spacers.values()) {
            self.doc.remove(node);
        }
        for link in self.links.values() {
            self.doc.remove(&link.holder);
        }
        for item in &self.items {
            self.doc.set_inline_style(&item.element, "display", "");
            self.doc.set_inline_style(&item.element, "order", "");
        }

        self.items.clear();
        self.letters.clear();
        self.container = None;
        self.headers.clear();
        self.spacers.clear();
        self.links.clear();
        self.visible.clear();
        self.query.clear();
        self.last_report = None;

        if let Some(field) = self.search_field() {
            self.doc.set_input_value(&field, "");
        }

        self.init()
    }

    pub fn stats(&self) -> FilterStats {
        let mut letter_distribution = BTreeMap::new();
        for item in &self.items {
            *letter_distribution.entry(item.letter).or_insert(0) += 1;
        }
        FilterStats {
            total_items: self.items.len(),
            unique_letters: self.letters.len(),
            visible_items: self.visible.iter().filter(|v| **v).count(),
            letter_distribution,
            average_sync_ms: self.timings.get_average_time("sync"),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Release the document, keeping every change made to it
    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn items(&self) -> &[Item<D::Node>] {
        &self.items
    }

    pub fn headers(&self) -> &BTreeMap<char, D::Node> {
        &self.headers
    }

    pub fn spacers(&self) -> &BTreeMap<char, D::Node> {
        &self.spacers
    }

    pub fn links(&self) -> &BTreeMap<char, NavLink<D::Node>> {
        &self.links
    }

    /// Parent element of the items, if layout found one
    pub fn item_container(&self) -> Option<&D::Node> {
        self.container.as_ref()
    }

    pub fn links_container(&self) -> Option<D::Node> {
        self.doc.query(&self.config.links_container_selector)
    }

    pub fn search_field(&self) -> Option<D::Node> {
        self.doc.query(&self.config.search_field_selector)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    pub fn last_report(&self) -> Option<&SyncReport> {
        self.last_report.as_ref()
    }

    /// Whether the item at `index` (group order) was visible at the last sync
    pub fn is_item_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Write a style only when it differs, so repeated passes cause no churn
    pub(crate) fn set_style(&self, node: &D::Node, property: &str, value: &str) {
        if self.doc.inline_style(node, property) != value {
            self.doc.set_inline_style(node, property, value);
        }
    }
}
