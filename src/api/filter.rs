//! JavaScript-facing filter handle
//!
//! The page composes the filter explicitly once the DOM (and any list
//! library feeding it) is ready:
//!
//! ```js
//! const filter = new AlphabeticalFilter({ scrollOffset: 96 });
//! document.addEventListener("alphabetical-filter:ready", (e) => console.log(e.detail));
//! // an external list library can publish its own visibility changes:
//! listInstance.on("renderitems", () => filter.notifyVisibilityChanged());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit};

use crate::dom::WebDocument;
use crate::engine::{AlphabeticalFilter, LinkAction, VisibilityBus};
use crate::models::{FilterConfig, FilterStats};
use crate::{wasm_error, wasm_info, wasm_warn};

use super::bindings::{EventBindings, WebFilter};
use super::helpers::{deserialize, filter_error, parse_letter, serialize};

/// Name of the event dispatched on `document` after each initialization
pub const READY_EVENT: &str = "alphabetical-filter:ready";

#[wasm_bindgen(js_name = AlphabeticalFilter)]
pub struct AlphabeticalFilterHandle {
    engine: Rc<RefCell<WebFilter>>,
    bus: Rc<VisibilityBus>,
    bindings: Option<EventBindings>,
}

#[wasm_bindgen(js_class = AlphabeticalFilter)]
impl AlphabeticalFilterHandle {
    /// Create and initialize a filter for the current page
    ///
    /// # Parameters
    /// - `config`: optional object overriding any `FilterConfig` field
    ///
    /// Initialization failures are logged and leave the page untouched;
    /// only an unusable configuration or a missing window is returned as
    /// an error.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<AlphabeticalFilterHandle, JsValue> {
        let config: FilterConfig = if config.is_undefined() || config.is_null() {
            FilterConfig::default()
        } else {
            deserialize(config, "Invalid filter configuration")?
        };

        let doc = WebDocument::from_window().map_err(|e| filter_error(e.into()))?;
        let engine = AlphabeticalFilter::new(doc, config).map_err(filter_error)?;

        let mut handle = AlphabeticalFilterHandle {
            engine: Rc::new(RefCell::new(engine)),
            bus: Rc::new(VisibilityBus::new()),
            bindings: None,
        };
        handle.mount(|filter| filter.init());
        Ok(handle)
    }

    /// Rebuild everything from the current DOM (clears the search field)
    pub fn refresh(&mut self) -> Result<JsValue, JsValue> {
        wasm_info!("Refreshing alphabetical filter...");
        self.bindings = None;
        self.mount(|filter| filter.refresh());
        self.get_stats()
    }

    /// Apply a search query immediately; returns the sync report
    pub fn search(&self, term: &str) -> Result<JsValue, JsValue> {
        let report = self
            .engine
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Filter is busy"))?
            .search(term);
        serialize(&report, "Failed to serialize sync report")
    }

    /// Tell the filter that item visibility changed outside its control
    ///
    /// Returns the number of subscribers notified (0 after `destroy`).
    #[wasm_bindgen(js_name = notifyVisibilityChanged)]
    pub fn notify_visibility_changed(&self) -> usize {
        self.bus.publish()
    }

    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        let stats = self
            .engine
            .try_borrow()
            .map_err(|_| JsValue::from_str("Filter is busy"))?
            .stats();
        serialize(&stats, "Failed to serialize filter stats")
    }

    /// Scroll to a letter group as an active link click would
    ///
    /// Returns false when the letter is invalid or currently inactive.
    #[wasm_bindgen(js_name = scrollToLetter)]
    pub fn scroll_to_letter(&self, letter: &str) -> bool {
        let Some(letter) = parse_letter(letter) else {
            wasm_warn!("scrollToLetter: '{}' is not a letter", letter);
            return false;
        };
        match self.engine.try_borrow() {
            Ok(filter) => matches!(filter.activate_link(letter), LinkAction::ScrollTo(_)),
            Err(_) => false,
        }
    }

    /// Detach every listener and the mutation observer
    pub fn destroy(&mut self) {
        self.bindings = None;
        wasm_info!("Alphabetical filter detached");
    }
}

impl AlphabeticalFilterHandle {
    /// Run an initialization step, wire events and announce readiness
    ///
    /// Errors stop here: a broken glossary must not break the page.
    fn mount(
        &mut self,
        init: impl FnOnce(&mut WebFilter) -> Result<FilterStats, crate::engine::FilterError>,
    ) {
        let result = match self.engine.try_borrow_mut() {
            Ok(mut filter) => init(&mut filter),
            Err(_) => {
                wasm_error!("Filter is busy, initialization skipped");
                return;
            }
        };

        match result {
            Ok(stats) => {
                wasm_info!(
                    "Alphabetical filter ready: {} items, {} letters",
                    stats.total_items,
                    stats.unique_letters
                );
                match EventBindings::attach(&self.engine, &self.bus) {
                    Ok(bindings) => self.bindings = Some(bindings),
                    Err(e) => wasm_error!("Failed to attach filter events: {:?}", e),
                }
                self.dispatch_ready(&stats);
            }
            Err(e) => wasm_error!("Error initializing alphabetical filter: {}", e),
        }
    }

    fn dispatch_ready(&self, stats: &FilterStats) {
        let Ok(detail) = serialize(stats, "Failed to serialize filter stats") else {
            return;
        };
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let event = match CustomEvent::new_with_event_init_dict(READY_EVENT, &init) {
            Ok(event) => event,
            Err(e) => {
                wasm_warn!("Failed to create {}: {:?}", READY_EVENT, e);
                return;
            }
        };

        let filter = self.engine.borrow();
        if let Err(e) = filter.document().document().dispatch_event(&event) {
            wasm_warn!("Failed to dispatch {}: {:?}", READY_EVENT, e);
        }
    }
}
