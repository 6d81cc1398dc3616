//! Filter configuration
//!
//! Every field is optional on the JavaScript side; missing fields take the
//! defaults below, which match the attribute names Webflow glossary pages use.

use serde::{Deserialize, Serialize};

use crate::engine::FilterError;

/// Selectors, class names and timings for one filter instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// One list entry
    pub item_selector: String,
    /// Descendant holding the item title
    pub title_selector: String,
    /// Descendant (or the item) receiving the generated id
    pub anchor_selector: String,
    /// Descendant (or the item) tagged with its letter, then hidden
    pub hidden_letter_selector: String,
    /// Container of the alphabet navigation
    pub links_container_selector: String,
    /// Optional link template inside the links container
    pub link_template_selector: String,
    /// Optional label element inside a cloned link
    pub letter_text_selector: String,
    /// Optional live search input
    pub search_field_selector: String,
    /// Marker an external filtering library puts on hidden items
    pub hidden_marker_selector: String,

    pub active_link_class: String,
    pub inactive_link_class: String,
    pub letter_header_class: String,
    pub spacer_class: String,

    /// Pixels subtracted from the anchor position when scrolling (fixed header)
    pub scroll_offset: f64,
    /// Show spacers between visible groups instead of leaving them to host CSS
    pub show_spacers: bool,
    /// Column count used when the container has no grid template
    pub default_column_count: u32,

    pub search_debounce_ms: u32,
    pub mutation_debounce_ms: u32,
    pub resize_debounce_ms: u32,
    pub orientation_delay_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            item_selector: "[data-glossary-item]".to_string(),
            title_selector: "[data-glossary-title]".to_string(),
            anchor_selector: "[data-letter-anchor]".to_string(),
            hidden_letter_selector: "[data-hidden-letter]".to_string(),
            links_container_selector: "[data-links-container]".to_string(),
            link_template_selector: "[data-letter-link-template]".to_string(),
            letter_text_selector: "[data-letter-text]".to_string(),
            search_field_selector: r#"[fs-list-field="search_term"]"#.to_string(),
            hidden_marker_selector: "[hidden]".to_string(),
            active_link_class: "is-active".to_string(),
            inactive_link_class: "is-inactive".to_string(),
            letter_header_class: "glossary-letter".to_string(),
            spacer_class: "spacer".to_string(),
            scroll_offset: 80.0,
            show_spacers: false,
            default_column_count: 2,
            search_debounce_ms: 100,
            mutation_debounce_ms: 50,
            resize_debounce_ms: 150,
            orientation_delay_ms: 300,
        }
    }
}

impl FilterConfig {
    /// Parse a JSON configuration object (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: FilterConfig =
            serde_json::from_str(json).map_err(|e| FilterError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot act on
    pub fn validate(&self) -> Result<(), FilterError> {
        let selectors = [
            ("itemSelector", &self.item_selector),
            ("titleSelector", &self.title_selector),
            ("anchorSelector", &self.anchor_selector),
            ("hiddenLetterSelector", &self.hidden_letter_selector),
            ("linksContainerSelector", &self.links_container_selector),
            ("linkTemplateSelector", &self.link_template_selector),
            ("letterTextSelector", &self.letter_text_selector),
            ("searchFieldSelector", &self.search_field_selector),
            ("hiddenMarkerSelector", &self.hidden_marker_selector),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(FilterError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        let classes = [
            ("activeLinkClass", &self.active_link_class),
            ("inactiveLinkClass", &self.inactive_link_class),
            ("letterHeaderClass", &self.letter_header_class),
            ("spacerClass", &self.spacer_class),
        ];
        for (name, value) in classes {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(FilterError::InvalidConfig(format!(
                    "{} must be a single class name, got '{}'",
                    name, value
                )));
            }
        }

        if !self.scroll_offset.is_finite() || self.scroll_offset < 0.0 {
            return Err(FilterError::InvalidConfig(format!(
                "scrollOffset must be a non-negative number, got {}",
                self.scroll_offset
            )));
        }

        if self.default_column_count == 0 {
            return Err(FilterError::InvalidConfig(
                "defaultColumnCount must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FilterConfig::from_json(r#"{"scrollOffset": 120, "activeLinkClass": "on"}"#)
            .expect("config should parse");
        assert_eq!(config.scroll_offset, 120.0);
        assert_eq!(config.active_link_class, "on");
        assert_eq!(config.item_selector, "[data-glossary-item]");
        assert_eq!(config.resize_debounce_ms, 150);
    }

    #[test]
    fn rejects_class_with_whitespace() {
        let err = FilterConfig::from_json(r#"{"spacerClass": "spacer big"}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_negative_offset_and_zero_columns() {
        let mut config = FilterConfig::default();
        config.scroll_offset = -1.0;
        assert!(config.validate().is_err());

        let mut config = FilterConfig::default();
        config.default_column_count = 0;
        assert!(config.validate().is_err());
    }
}
