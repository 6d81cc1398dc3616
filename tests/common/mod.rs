// Shared glossary markup for integration tests

#![allow(dead_code)]

use glossary_filter_wasm::dom::{HostDocument, MemoryDocument, NodeId};
use glossary_filter_wasm::{AlphabeticalFilter, FilterConfig};

pub type TestFilter = AlphabeticalFilter<MemoryDocument>;

/// Node handles of the generated page
pub struct Markup {
    pub list: NodeId,
    pub links: NodeId,
    pub search: NodeId,
    pub items: Vec<NodeId>,
}

/// Build a Webflow-style glossary page with one item per title
pub fn glossary(titles: &[&str]) -> (MemoryDocument, Markup) {
    let doc = MemoryDocument::new();
    let body = doc.body();

    let search = doc.add(body, "input", &[("fs-list-field", "search_term")]);
    let links = doc.add(body, "div", &[("data-links-container", "")]);
    let list = doc.add(body, "div", &[("class", "glossary_list")]);
    doc.set_sheet_style(list, "display", "grid");
    doc.set_sheet_style(list, "grid-template-columns", "300px 300px");

    let items = titles
        .iter()
        .map(|title| {
            let item = doc.add(list, "div", &[("data-glossary-item", "")]);
            doc.add(item, "a", &[("data-letter-anchor", "")]);
            doc.add_text(item, "div", &[("data-hidden-letter", "")], "?");
            doc.add_text(item, "h3", &[("data-glossary-title", "")], title);
            item
        })
        .collect();

    (doc, Markup { list, links, search, items })
}

/// Initialized filter over `titles` with default configuration
pub fn init_filter(titles: &[&str]) -> (TestFilter, Markup) {
    let (doc, markup) = glossary(titles);
    let mut filter = AlphabeticalFilter::new(doc, FilterConfig::default()).expect("valid config");
    filter.init().expect("init should succeed");
    (filter, markup)
}

/// Titles of the collected items, in group order
pub fn titles(filter: &TestFilter) -> Vec<String> {
    filter.items().iter().map(|item| item.title.clone()).collect()
}

/// Titles of the items visible at the last sync
pub fn visible_titles(filter: &TestFilter) -> Vec<String> {
    filter
        .items()
        .iter()
        .enumerate()
        .filter(|(index, _)| filter.is_item_visible(*index))
        .map(|(_, item)| item.title.clone())
        .collect()
}

pub fn header_visible(filter: &TestFilter, letter: char) -> bool {
    let header = filter.headers().get(&letter).expect("header exists");
    filter.document().inline_style(header, "display") != "none"
}

/// Letters whose navigation link is active
pub fn active_letters(filter: &TestFilter) -> Vec<char> {
    filter
        .links()
        .values()
        .filter(|link| link.active)
        .map(|link| link.letter)
        .collect()
}

pub fn href(filter: &TestFilter, letter: char) -> Option<String> {
    let link = filter.links().get(&letter).expect("link exists");
    let anchor = link.anchor.as_ref().expect("link has an anchor element");
    filter.document().attribute(anchor, "href")
}

/// Inline `display` and `order` of every child of the list, in DOM order
pub fn style_snapshot(filter: &TestFilter, list: NodeId) -> Vec<(String, String)> {
    let doc = filter.document();
    doc.children(list)
        .into_iter()
        .map(|child| (doc.inline_style(&child, "display"), doc.inline_style(&child, "order")))
        .collect()
}
