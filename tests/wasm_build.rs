//! Browser tests
//!
//! Exercises the exported `AlphabeticalFilter` class against a real DOM.
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use glossary_filter_wasm::api::AlphabeticalFilterHandle;
use glossary_filter_wasm::dom::{HostDocument, WebDocument};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, MutationObserver, MutationObserverInit};

wasm_bindgen_test_configure!(run_in_browser);

fn build_page(titles: &[&str]) -> WebDocument {
    let doc = WebDocument::from_window().unwrap();
    let body = doc.document().body().unwrap();
    body.set_inner_html("");

    let search = doc.create_element("input").unwrap();
    doc.set_attribute(&search, "fs-list-field", "search_term").unwrap();
    body.append_child(&search).unwrap();

    let links = doc.create_element("div").unwrap();
    doc.set_attribute(&links, "data-links-container", "").unwrap();
    body.append_child(&links).unwrap();

    let list = doc.create_element("div").unwrap();
    doc.set_inline_style(&list, "display", "grid");
    doc.set_inline_style(&list, "grid-template-columns", "200px 200px");
    body.append_child(&list).unwrap();

    for title in titles {
        let item = doc.create_element("div").unwrap();
        doc.set_attribute(&item, "data-glossary-item", "").unwrap();
        item.set_inner_html(&format!(
            "<a data-letter-anchor></a><div data-hidden-letter></div><h3 data-glossary-title>{}</h3>",
            title
        ));
        list.append_child(&item).unwrap();
    }
    doc
}

/// Resolve after `ms` milliseconds
async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn fast_config() -> JsValue {
    js_sys::JSON::parse(r#"{"mutationDebounceMs": 10, "resizeDebounceMs": 10, "searchDebounceMs": 10}"#).unwrap()
}

fn item_titled(doc: &WebDocument, title: &str) -> Element {
    doc.query_all("[data-glossary-item]")
        .into_iter()
        .find(|item| {
            doc.query_within(item, "[data-glossary-title]")
                .map(|t| doc.text(&t) == title)
                .unwrap_or(false)
        })
        .unwrap()
}

fn header(doc: &WebDocument, letter: char) -> Element {
    doc.query(&format!("[data-letter-header=\"{}\"]", letter)).unwrap()
}

fn link(doc: &WebDocument, letter: char) -> Element {
    doc.query(&format!("[data-letter-link=\"{}\"]", letter)).unwrap()
}

fn stat(stats: &JsValue, key: &str) -> f64 {
    js_sys::Reflect::get(stats, &JsValue::from_str(key))
        .unwrap()
        .as_f64()
        .unwrap()
}

#[wasm_bindgen_test]
fn test_filter_initializes_on_page() {
    let doc = build_page(&["Banana", "Apple", "Cherry"]);
    let filter = AlphabeticalFilterHandle::new(JsValue::UNDEFINED).unwrap();

    let stats = filter.get_stats().unwrap();
    assert_eq!(stat(&stats, "totalItems"), 3.0);
    assert_eq!(stat(&stats, "uniqueLetters"), 3.0);
    assert_eq!(doc.query_all("[data-letter-header]").len(), 3);
    assert_eq!(doc.query_all("[data-letter-link]").len(), 26);
}

#[wasm_bindgen_test]
fn test_search_hides_other_groups() {
    let doc = build_page(&["Banana", "Apple", "Cherry"]);
    let filter = AlphabeticalFilterHandle::new(JsValue::UNDEFINED).unwrap();

    filter.search("cher").unwrap();

    let header_a = doc.query("[data-letter-header=\"A\"]").unwrap();
    let header_c = doc.query("[data-letter-header=\"C\"]").unwrap();
    assert_eq!(doc.inline_style(&header_a, "display"), "none");
    assert_eq!(doc.inline_style(&header_c, "display"), "flex");
    assert!(!filter.scroll_to_letter("A"));
}

#[wasm_bindgen_test]
fn test_invalid_config_is_rejected() {
    build_page(&["Apple"]);
    let config = js_sys::JSON::parse(r#"{"itemSelector": ""}"#).unwrap();
    assert!(AlphabeticalFilterHandle::new(config).is_err());
}

#[wasm_bindgen_test]
fn test_destroy_detaches_bus_subscribers() {
    build_page(&["Apple"]);
    let mut filter = AlphabeticalFilterHandle::new(JsValue::UNDEFINED).unwrap();
    assert_eq!(filter.notify_visibility_changed(), 1);

    filter.destroy();
    assert_eq!(filter.notify_visibility_changed(), 0);
}

#[wasm_bindgen_test]
async fn test_external_hiding_resynchronizes() {
    let doc = build_page(&["Banana", "Apple", "Cherry"]);
    let _filter = AlphabeticalFilterHandle::new(fast_config()).unwrap();

    // A list library hides every A entry behind the filter's back
    item_titled(&doc, "Apple").set_attribute("hidden", "").unwrap();
    sleep(120).await;

    assert_eq!(doc.inline_style(&header(&doc, 'A'), "display"), "none");
    assert!(doc.has_class(&link(&doc, 'A'), "is-inactive"));
    assert_eq!(doc.attribute(&link(&doc, 'A'), "href"), None);
    assert_eq!(doc.inline_style(&header(&doc, 'B'), "order"), "1001");

    item_titled(&doc, "Apple").remove_attribute("hidden").unwrap();
    sleep(120).await;

    assert_eq!(doc.inline_style(&header(&doc, 'A'), "display"), "flex");
    assert!(doc.has_class(&link(&doc, 'A'), "is-active"));
}

#[wasm_bindgen_test]
async fn test_own_writes_do_not_retrigger_sync() {
    let doc = build_page(&["Banana", "Apple", "Cherry"]);
    let _filter = AlphabeticalFilterHandle::new(fast_config()).unwrap();
    let list = doc.query("[data-glossary-item]").and_then(|item| doc.parent(&item)).unwrap();

    let writes = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&writes);
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, _observer: MutationObserver| {
            counter.set(counter.get() + records.length());
        },
    );
    let watcher = MutationObserver::new(callback.as_ref().unchecked_ref()).unwrap();
    let options = MutationObserverInit::new();
    options.set_attributes(true);
    options.set_subtree(true);
    watcher.observe_with_options(&list, &options).unwrap();

    item_titled(&doc, "Cherry").set_attribute("hidden", "").unwrap();
    sleep(120).await;
    assert!(writes.get() > 1, "the resync should have restyled the list");

    // Settled: no further writes once the resync is done
    let settled = writes.get();
    sleep(200).await;
    assert_eq!(writes.get(), settled);
    watcher.disconnect();
}

#[wasm_bindgen_test]
async fn test_resize_reapplies_header_span() {
    let doc = build_page(&["Banana", "Apple", "Cherry"]);
    let filter = AlphabeticalFilterHandle::new(fast_config()).unwrap();
    filter.search("an").unwrap();

    let list = doc.query("[data-glossary-item]").and_then(|item| doc.parent(&item)).unwrap();
    doc.set_inline_style(&list, "grid-template-columns", "100px 100px 100px");
    doc.window().dispatch_event(&Event::new("resize").unwrap()).unwrap();
    sleep(120).await;

    assert_eq!(doc.inline_style(&header(&doc, 'B'), "grid-column"), "span 3");
    assert_eq!(doc.inline_style(&header(&doc, 'A'), "grid-column"), "span 2");
    assert_eq!(doc.inline_style(&header(&doc, 'A'), "display"), "none");
}
