//! Browser document binding over `web-sys`

use std::cmp::Ordering;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, ScrollBehavior, ScrollToOptions, Window};

use super::{DomError, HostDocument};
use crate::models::compare_titles;

fn js_reason(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// The live page document
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    /// Bind to the global window, failing outside a browser context
    pub fn from_window() -> Result<Self, DomError> {
        let window = web_sys::window()
            .ok_or_else(|| DomError::operation("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::operation("document", "window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl HostDocument for WebDocument {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        Self::collect(self.document.query_selector_all(selector))
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        Self::collect(root.query_selector_all(selector))
    }

    fn query_within(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn matches(&self, node: &Element, selector: &str) -> bool {
        node.matches(selector).unwrap_or(false)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_uppercase()
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value)
            .map_err(|e| DomError::operation("setAttribute", js_reason(e)))
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn class_names(&self, node: &Element) -> Vec<String> {
        node.class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn inline_style(&self, node: &Element, property: &str) -> String {
        node.dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_inline_style(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn computed_style(&self, node: &Element, property: &str) -> String {
        self.window
            .get_computed_style(node)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn bounding_area(&self, node: &Element) -> f64 {
        let rect = node.get_bounding_client_rect();
        rect.width() * rect.height()
    }

    fn document_top(&self, node: &Element) -> f64 {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        node.get_bounding_client_rect().top() + scroll_y
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|e| DomError::operation("createElement", js_reason(e)))
    }

    fn clone_deep(&self, node: &Element) -> Result<Element, DomError> {
        node.clone_node_with_deep(true)
            .map_err(|e| DomError::operation("cloneNode", js_reason(e)))?
            .dyn_into::<Element>()
            .map_err(|_| DomError::operation("cloneNode", "clone is not an element"))
    }

    fn insert_before(
        &self,
        parent: &Element,
        node: &Element,
        reference: Option<&Element>,
    ) -> Result<(), DomError> {
        let reference: Option<&web_sys::Node> = reference.map(|r| r.as_ref());
        parent
            .insert_before(node, reference)
            .map(|_| ())
            .map_err(|e| DomError::operation("insertBefore", js_reason(e)))
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        // String.prototype.localeCompare with the page's default locale
        let collated = js_sys::JsString::from(a).locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new());
        collated.cmp(&0).then_with(|| compare_titles(a, b))
    }

    fn input_value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_input_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }
}
