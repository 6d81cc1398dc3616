// Item collection, alphabetical grouping and header layout

mod common;

use common::{glossary, init_filter, titles};
use glossary_filter_wasm::dom::{HostDocument, MemoryDocument};
use glossary_filter_wasm::engine::collect_items;
use glossary_filter_wasm::{AlphabeticalFilter, FilterConfig};

#[test]
fn test_items_sorted_by_letter_then_title() {
    let (filter, _) = init_filter(&["Banana", "Apple", "Blueberry", "Cherry"]);

    assert_eq!(titles(&filter), vec!["Apple", "Banana", "Blueberry", "Cherry"]);
    let letters: Vec<char> = filter.items().iter().map(|item| item.letter).collect();
    assert_eq!(letters, vec!['A', 'B', 'B', 'C']);
    assert_eq!(filter.headers().keys().copied().collect::<Vec<_>>(), vec!['A', 'B', 'C']);
}

#[test]
fn test_accented_titles_sort_by_collation() {
    let (filter, _) = init_filter(&["Annuel", "Année", "Zèbre", "Zoo"]);

    assert_eq!(titles(&filter), vec!["Année", "Annuel", "Zèbre", "Zoo"]);
    let ids: Vec<Option<String>> = filter.items().iter().map(|item| item.id.clone()).collect();
    assert_eq!(ids[0].as_deref(), Some("A-0"));
    assert_eq!(ids[2].as_deref(), Some("Z-0"));
}

#[test]
fn test_large_group_keys_stay_below_next_group() {
    let mut names: Vec<String> = (0..1200).map(|i| format!("Aardvark {:04}", i)).collect();
    names.push("Banana".to_string());
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let (filter, _) = init_filter(&refs);
    let doc = filter.document();

    let last_a = filter.items()[1199].order.unwrap();
    let b_spacer: i32 = doc.inline_style(&filter.spacers()[&'B'], "order").parse().unwrap();
    let b_header: i32 = doc.inline_style(&filter.headers()[&'B'], "order").parse().unwrap();
    let banana = filter.items()[1200].order.unwrap();

    assert_eq!(filter.items()[1199].title, "Aardvark 1199");
    assert!(last_a < b_spacer);
    assert!(b_spacer < b_header && b_header < banana);
}

#[test]
fn test_dom_reordered_with_headers_and_spacers() {
    let (filter, markup) = init_filter(&["Banana", "Apple", "Blueberry", "Cherry"]);
    let doc = filter.document();

    let labels: Vec<String> = doc
        .children(markup.list)
        .into_iter()
        .map(|child| {
            if let Some(letter) = doc.attribute(&child, "data-letter-header") {
                format!("header:{}", letter)
            } else if let Some(letter) = doc.attribute(&child, "data-letter-spacer") {
                format!("spacer:{}", letter)
            } else {
                let title = doc.query_within(&child, "[data-glossary-title]").unwrap();
                doc.text(&title)
            }
        })
        .collect();

    assert_eq!(
        labels,
        vec![
            "header:A", "Apple", "spacer:B", "header:B", "Banana", "Blueberry", "spacer:C",
            "header:C", "Cherry",
        ]
    );
    // No spacer before the first group
    assert!(!filter.spacers().contains_key(&'A'));
}

#[test]
fn test_header_markup() {
    let (filter, _) = init_filter(&["Apple", "Banana"]);
    let doc = filter.document();
    let header = &filter.headers()[&'A'];

    assert_eq!(doc.text(header), "A");
    assert!(doc.has_class(header, "glossary-letter"));
    assert_eq!(doc.inline_style(header, "display"), "flex");
    assert_eq!(doc.inline_style(header, "grid-column"), "span 2");
    assert_eq!(doc.inline_style(header, "order"), "1001");

    let spacer = &filter.spacers()[&'B'];
    assert!(doc.has_class(spacer, "spacer"));
    assert_eq!(doc.inline_style(spacer, "display"), "none");
}

#[test]
fn test_anchor_ids_are_sequential_per_letter() {
    let (filter, _) = init_filter(&["Blueberry", "Apple", "Banana", "Avocado"]);
    let doc = filter.document();

    let ids: Vec<Option<String>> = filter.items().iter().map(|item| item.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            Some("A-0".to_string()),
            Some("A-1".to_string()),
            Some("B-0".to_string()),
            Some("B-1".to_string()),
        ]
    );

    let anchor = filter.items()[1].anchor.as_ref().unwrap();
    assert_eq!(doc.attribute(anchor, "id").as_deref(), Some("A-1"));
    assert_eq!(doc.attribute(anchor, "data-letter").as_deref(), Some("A"));
}

#[test]
fn test_hidden_letter_element_tagged_and_hidden() {
    let (filter, _) = init_filter(&["Cherry"]);
    let doc = filter.document();
    let item = &filter.items()[0];
    let hidden = doc.query_within(&item.element, "[data-hidden-letter]").unwrap();

    assert_eq!(doc.text(&hidden), "C");
    assert_eq!(doc.attribute(&hidden, "data-letter").as_deref(), Some("C"));
    assert_eq!(doc.inline_style(&hidden, "display"), "none");
}

#[test]
fn test_items_without_letters_are_excluded() {
    let (filter, markup) = init_filter(&["42", "Apple", "  ", "#1 Banana"]);

    assert_eq!(titles(&filter), vec!["Apple", "#1 Banana"]);
    assert!(filter.items().len() <= markup.items.len());
    assert_eq!(filter.stats().total_items, 2);
}

#[test]
fn test_item_without_title_is_skipped() {
    let (doc, markup) = glossary(&["Apple"]);
    let orphan = doc.add(markup.list, "div", &[("data-glossary-item", "")]);
    doc.add(orphan, "a", &[("data-letter-anchor", "")]);

    let mut filter = AlphabeticalFilter::new(doc, FilterConfig::default()).unwrap();
    filter.init().unwrap();

    assert_eq!(titles(&filter), vec!["Apple"]);
}

#[test]
fn test_missing_anchor_keeps_item_groupable() {
    let (doc, markup) = glossary(&["Apple"]);
    let bare = doc.add(markup.list, "div", &[("data-glossary-item", "")]);
    doc.add_text(bare, "h3", &[("data-glossary-title", "")], "Apricot");

    let mut filter = AlphabeticalFilter::new(doc, FilterConfig::default()).unwrap();
    filter.init().unwrap();

    assert_eq!(titles(&filter), vec!["Apple", "Apricot"]);
    assert_eq!(filter.items()[1].id, None);
    assert_eq!(filter.stats().visible_items, 2);
}

#[test]
fn test_item_as_its_own_anchor() {
    let doc = MemoryDocument::new();
    let list = doc.add(doc.body(), "div", &[]);
    let item = doc.add(list, "div", &[("data-glossary-item", ""), ("data-letter-anchor", "")]);
    doc.add_text(item, "span", &[("data-glossary-title", "")], "Zebra");

    let mut filter = AlphabeticalFilter::new(doc, FilterConfig::default()).unwrap();
    filter.init().unwrap();

    assert_eq!(filter.document().attribute(&item, "id").as_deref(), Some("Z-0"));
    assert_eq!(filter.items()[0].anchor, Some(item));
}

#[test]
fn test_collection_is_deterministic() {
    let titles_in = ["Kiwi", "apple", "Apricot", "banana", "Avocado"];
    let (first, _) = glossary(&titles_in);
    let (second, _) = glossary(&titles_in);
    let config = FilterConfig::default();

    let a: Vec<String> = collect_items(&first, &config).into_iter().map(|i| i.title).collect();
    let b: Vec<String> = collect_items(&second, &config).into_iter().map(|i| i.title).collect();
    assert_eq!(a, b);
    assert_eq!(a, vec!["Kiwi", "apple", "Apricot", "banana", "Avocado"]);

    let (filter, _) = init_filter(&titles_in);
    assert_eq!(titles(&filter), vec!["apple", "Apricot", "Avocado", "banana", "Kiwi"]);
}

#[test]
fn test_header_span_follows_grid_columns() {
    let (doc, markup) = glossary(&["Apple"]);
    doc.set_sheet_style(markup.list, "grid-template-columns", "200px 200px 200px");

    let mut filter = AlphabeticalFilter::new(doc, FilterConfig::default()).unwrap();
    filter.init().unwrap();

    let header = &filter.headers()[&'A'];
    assert_eq!(filter.document().inline_style(header, "grid-column"), "span 3");
    assert_eq!(filter.column_count(), 3);
}

#[test]
fn test_column_count_defaults_without_grid() {
    let (doc, markup) = glossary(&["Apple"]);
    doc.set_sheet_style(markup.list, "grid-template-columns", "none");

    let mut filter = AlphabeticalFilter::new(doc, FilterConfig::default()).unwrap();
    filter.init().unwrap();

    assert_eq!(filter.column_count(), 2);
}

#[test]
fn test_empty_list_initializes() {
    let (filter, _) = init_filter(&[]);
    assert!(filter.items().is_empty());
    assert!(filter.headers().is_empty());
    assert_eq!(filter.links().len(), 26);
    assert!(filter.links().values().all(|link| !link.active));
}
