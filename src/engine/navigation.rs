//! Alphabet navigation
//!
//! Builds one link per letter A-Z inside the links container. A template
//! marked with `linkTemplateSelector` is cloned per letter so the page's own
//! link styling applies; without one, bare `<a>` elements are synthesized.
//! A link is active iff its letter has a visible item; inactive links lose
//! their `href` and their clicks are swallowed.

use super::{AlphabeticalFilter, FilterError, VisibilityProvider, LINK_ATTR};
use crate::dom::{selector_attribute_name, HostDocument};
use crate::models::alphabet;

/// One generated navigation link
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink<N> {
    pub letter: char,
    /// The element carrying state classes (clone or synthesized link)
    pub holder: N,
    /// The element carrying `href`; the holder itself when it is an `<a>`
    pub anchor: Option<N>,
    pub active: bool,
}

/// What a click on a navigation link should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkAction {
    /// Swallow the click (inactive link, or nothing to scroll to)
    Suppress,
    /// Prevent default navigation and smooth-scroll to this document offset
    ScrollTo(f64),
}

impl<D: HostDocument, V: VisibilityProvider<D>> AlphabeticalFilter<D, V> {
    pub(crate) fn build_navigation(&mut self) -> Result<(), FilterError> {
        let Some(container) = self.links_container() else {
            log::error!("Alphabet links container not found");
            return Ok(());
        };

        // Clones may still match a class-based template selector
        let template = self
            .doc
            .query_all_within(&container, &self.config.link_template_selector)
            .into_iter()
            .find(|node| self.doc.attribute(node, LINK_ATTR).is_none());

        // Drop links from an earlier build; the template stays
        for existing in self.doc.query_all_within(&container, &format!("[{}]", LINK_ATTR)) {
            if template.as_ref() != Some(&existing) {
                self.doc.remove(&existing);
            }
        }
        self.links.clear();

        // Classes copied onto synthesized links from a template living elsewhere
        let borrowed_classes: Vec<String> = match &template {
            Some(_) => Vec::new(),
            None => self
                .doc
                .query(&self.config.link_template_selector)
                .map(|t| self.doc.class_names(&t))
                .unwrap_or_default()
                .into_iter()
                .filter(|c| *c != self.config.active_link_class && *c != self.config.inactive_link_class)
                .collect(),
        };

        if let Some(template) = &template {
            self.doc.set_inline_style(template, "display", "none");
        }

        for letter in alphabet() {
            let holder = match &template {
                Some(template) => self.clone_link(template, letter)?,
                None => self.synthesize_link(letter, &borrowed_classes)?,
            };
            self.doc.append_child(&container, &holder)?;

            let anchor = if self.doc.tag_name(&holder) == "A" {
                Some(holder.clone())
            } else {
                self.doc.query_within(&holder, "a")
            };

            self.doc.add_class(&holder, &self.config.inactive_link_class);
            self.links.insert(
                letter,
                NavLink {
                    letter,
                    holder,
                    anchor,
                    active: false,
                },
            );

            let target = self
                .items
                .iter()
                .find(|item| item.letter == letter)
                .and_then(|item| item.id.clone());
            self.apply_link_state(letter, self.letters.contains(&letter), target);
        }

        log::info!(
            "Alphabet navigation created {}",
            if template.is_some() { "from template" } else { "dynamically" }
        );
        Ok(())
    }

    fn clone_link(&self, template: &D::Node, letter: char) -> Result<D::Node, FilterError> {
        let clone = self.doc.clone_deep(template)?;
        if let Some(marker) = selector_attribute_name(&self.config.link_template_selector) {
            self.doc.remove_attribute(&clone, &marker);
        }
        self.doc.remove_attribute(&clone, "id");
        self.doc.set_attribute(&clone, LINK_ATTR, &letter.to_string())?;
        self.doc.set_inline_style(&clone, "display", "");

        let label = self
            .doc
            .query_within(&clone, &self.config.letter_text_selector)
            .unwrap_or_else(|| clone.clone());
        self.doc.set_text(&label, &letter.to_string());
        Ok(clone)
    }

    fn synthesize_link(&self, letter: char, classes: &[String]) -> Result<D::Node, FilterError> {
        let link = self.doc.create_element("a")?;
        self.doc.set_text(&link, &letter.to_string());
        self.doc.set_attribute(&link, LINK_ATTR, &letter.to_string())?;
        for class in classes {
            self.doc.add_class(&link, class);
        }
        Ok(link)
    }

    /// Flip one link between active and inactive
    pub(crate) fn apply_link_state(&mut self, letter: char, active: bool, target: Option<String>) {
        let Some(link) = self.links.get_mut(&letter) else {
            return;
        };
        let (on, off) = if active {
            (&self.config.active_link_class, &self.config.inactive_link_class)
        } else {
            (&self.config.inactive_link_class, &self.config.active_link_class)
        };
        self.doc.remove_class(&link.holder, off);
        self.doc.add_class(&link.holder, on);

        if let Some(anchor) = &link.anchor {
            match target.filter(|_| active) {
                Some(id) => {
                    let href = format!("#{}", id);
                    if self.doc.attribute(anchor, "href").as_deref() != Some(href.as_str()) {
                        let _ = self.doc.set_attribute(anchor, "href", &href);
                    }
                }
                None => self.doc.remove_attribute(anchor, "href"),
            }
        }
        link.active = active;
    }

    /// Resolve a click on the link for `letter`
    ///
    /// Active links scroll to the first visible item of their group, offset
    /// by `scrollOffset` and floored at zero. Inactive links never navigate,
    /// whatever `href` they may have been given since.
    pub fn link_click(&self, letter: char) -> LinkAction {
        let active = self.links.get(&letter).map(|l| l.active).unwrap_or(false);
        if !active {
            return LinkAction::Suppress;
        }

        let target = self
            .items
            .iter()
            .enumerate()
            .filter(|(index, item)| item.letter == letter && self.is_item_visible(*index))
            .find_map(|(_, item)| item.anchor.clone())
            .or_else(|| self.headers.get(&letter).cloned());

        match target {
            Some(node) => {
                let top = self.doc.document_top(&node) - self.config.scroll_offset;
                LinkAction::ScrollTo(top.max(0.0))
            }
            None => LinkAction::Suppress,
        }
    }

    /// Resolve a click and perform the scroll it calls for
    pub fn activate_link(&self, letter: char) -> LinkAction {
        let action = self.link_click(letter);
        if let LinkAction::ScrollTo(top) = action {
            self.doc.scroll_to(top);
        }
        action
    }
}
