//! Grouping and layout
//!
//! Sorts the collected items once, moves their elements into that order,
//! tags anchors and hidden-letter elements, and inserts one header (plus a
//! spacer for every group but the first) per letter. From then on visual
//! order is expressed with CSS `order` keys:
//!
//! ```text
//! rank * stride + 0      spacer
//! rank * stride + 1      header
//! rank * stride + 2 + k  k-th item of the group
//! ```
//!
//! The stride is [`GROUP_STRIDE`] unless a group is too large for it, in
//! which case it grows to the next multiple that fits the largest group.
//! Ranks are dense over the groups that currently have visible items, so a
//! hidden group never leaves a gap.

use std::collections::BTreeMap;
use std::ops::Range;

use super::{AlphabeticalFilter, FilterError, VisibilityProvider, HEADER_ATTR, LETTER_ATTR, SPACER_ATTR};
use crate::dom::HostDocument;

/// Base key distance between consecutive group ranks
pub const GROUP_STRIDE: i32 = 1000;

const SPACER_SLOT: i32 = 0;
const HEADER_SLOT: i32 = 1;
const FIRST_ITEM_SLOT: i32 = 2;

/// Key distance that keeps every slot of a `largest_group`-item group below
/// the next group's spacer
pub fn group_stride(largest_group: usize) -> i32 {
    let needed = largest_group as i32 + FIRST_ITEM_SLOT;
    if needed <= GROUP_STRIDE {
        GROUP_STRIDE
    } else {
        (needed + GROUP_STRIDE - 1) / GROUP_STRIDE * GROUP_STRIDE
    }
}

/// Ordering key for `slot` within the group of dense rank `rank`
pub fn ordering_key(rank: u32, slot: i32, stride: i32) -> i32 {
    rank as i32 * stride + slot
}

/// Number of columns in a `grid-template-columns` value
///
/// Named lines (`[full-start]`) are not tracks and are skipped.
pub fn parse_column_count(template: &str) -> Option<u32> {
    let template = template.trim();
    if template.is_empty() || template == "none" {
        return None;
    }

    let mut brackets = 0usize;
    let mut parens = 0usize;
    let mut in_track = false;
    let mut tracks = 0u32;
    for c in template.chars() {
        match c {
            '[' => {
                brackets += 1;
                in_track = false;
            }
            ']' => brackets = brackets.saturating_sub(1),
            _ if brackets > 0 => {}
            c if c.is_whitespace() => {
                if parens == 0 {
                    in_track = false;
                }
            }
            c => {
                match c {
                    '(' => parens += 1,
                    ')' => parens = parens.saturating_sub(1),
                    _ => {}
                }
                if !in_track {
                    tracks += 1;
                    in_track = true;
                }
            }
        }
    }
    (tracks > 0).then_some(tracks)
}

impl<D: HostDocument, V: VisibilityProvider<D>> AlphabeticalFilter<D, V> {
    /// Contiguous item ranges per letter (items must already be sorted)
    pub(crate) fn groups(&self) -> Vec<(char, Range<usize>)> {
        let mut groups: Vec<(char, Range<usize>)> = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            match groups.last_mut() {
                Some((letter, range)) if *letter == item.letter => range.end = index + 1,
                _ => groups.push((item.letter, index..index + 1)),
            }
        }
        groups
    }

    /// Current column count of the item container
    pub(crate) fn read_column_count(&self) -> u32 {
        self.container
            .as_ref()
            .and_then(|c| parse_column_count(&self.doc.computed_style(c, "grid-template-columns")))
            .unwrap_or(self.config.default_column_count)
    }

    pub(crate) fn arrange_groups(&mut self) -> Result<(), FilterError> {
        if self.items.is_empty() {
            return Ok(());
        }

        let doc = &self.doc;
        self.items
            .sort_by(|a, b| a.cmp_group_order(b, |x, y| doc.compare_text(x, y)));
        self.assign_anchors()?;

        let Some(container) = self.doc.parent(&self.items[0].element) else {
            log::warn!("Could not find container to reorganize items");
            return Ok(());
        };

        // One-time physical reorder; markup order is arbitrary
        for item in &self.items {
            self.doc.append_child(&container, &item.element)?;
        }
        self.container = Some(container.clone());
        log::info!("Items reorganized by letter");

        self.column_count = self.read_column_count();
        let span = format!("span {}", self.column_count);

        for (position, (letter, range)) in self.groups().into_iter().enumerate() {
            let first = self.items[range.start].element.clone();
            let label = letter.to_string();

            if position > 0 {
                let spacer = self.doc.create_element("div")?;
                self.doc.add_class(&spacer, &self.config.spacer_class);
                self.doc.set_attribute(&spacer, SPACER_ATTR, &label)?;
                self.doc.set_inline_style(&spacer, "display", "none");
                self.doc.insert_before(&container, &spacer, Some(&first))?;
                self.spacers.insert(letter, spacer);
            }

            let header = self.doc.create_element("div")?;
            self.doc.add_class(&header, &self.config.letter_header_class);
            self.doc.set_text(&header, &label);
            self.doc.set_attribute(&header, HEADER_ATTR, &label)?;
            self.doc.set_inline_style(&header, "grid-column", &span);
            self.doc.set_inline_style(&header, "display", "flex");
            self.doc.insert_before(&container, &header, Some(&first))?;
            self.headers.insert(letter, header);
        }

        log::info!("Created {} letter separators", self.headers.len());
        Ok(())
    }

    /// Give every item with an anchor a `<letter>-<n>` id and tag its
    /// hidden-letter element
    fn assign_anchors(&mut self) -> Result<(), FilterError> {
        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        let anchor_selector = &self.config.anchor_selector;
        let hidden_selector = &self.config.hidden_letter_selector;

        for item in &mut self.items {
            let letter = item.letter.to_string();

            let anchor = if self.doc.matches(&item.element, anchor_selector) {
                Some(item.element.clone())
            } else {
                self.doc.query_within(&item.element, anchor_selector)
            };
            match anchor {
                Some(anchor) => {
                    let count = counts.entry(item.letter).or_insert(0);
                    let id = format!("{}-{}", item.letter, count);
                    *count += 1;
                    self.doc.set_attribute(&anchor, "id", &id)?;
                    self.doc.set_attribute(&anchor, LETTER_ATTR, &letter)?;
                    item.id = Some(id);
                    item.anchor = Some(anchor);
                }
                None => log::warn!("No anchor element found for: {}", item.title),
            }

            if self.doc.matches(&item.element, hidden_selector) {
                // The item itself is the marker; keep its content and visibility
                self.doc.set_attribute(&item.element, LETTER_ATTR, &letter)?;
            } else if let Some(hidden) = self.doc.query_within(&item.element, hidden_selector) {
                self.doc.set_attribute(&hidden, LETTER_ATTR, &letter)?;
                self.doc.set_text(&hidden, &letter);
                self.doc.set_inline_style(&hidden, "display", "none");
            } else {
                log::warn!("No hidden letter element found for: {}", item.title);
            }
        }
        Ok(())
    }

    /// Assign ordering keys from visibility flags and show or hide headers
    ///
    /// Returns the dense rank of every group with a visible item.
    pub(crate) fn apply_ordering(&mut self, visible: &[bool]) -> BTreeMap<char, u32> {
        let mut ranks = BTreeMap::new();
        let span = format!("span {}", self.column_count);
        let groups = self.groups();
        let stride = group_stride(groups.iter().map(|(_, range)| range.len()).max().unwrap_or(0));
        let mut rank = 0u32;

        for (letter, range) in groups {
            let header = self.headers.get(&letter).cloned();
            let spacer = self.spacers.get(&letter).cloned();

            if !range.clone().any(|i| visible.get(i).copied().unwrap_or(false)) {
                if let Some(header) = &header {
                    self.set_style(header, "display", "none");
                }
                if let Some(spacer) = &spacer {
                    self.set_style(spacer, "display", "none");
                }
                continue;
            }

            rank += 1;
            ranks.insert(letter, rank);

            if let Some(spacer) = &spacer {
                self.set_style(spacer, "order", &ordering_key(rank, SPACER_SLOT, stride).to_string());
                let display = if self.config.show_spacers && rank > 1 { "block" } else { "none" };
                self.set_style(spacer, "display", display);
            }
            if let Some(header) = &header {
                self.set_style(header, "order", &ordering_key(rank, HEADER_SLOT, stride).to_string());
                self.set_style(header, "display", "flex");
                self.set_style(header, "grid-column", &span);
            }
            for (k, index) in range.enumerate() {
                let key = ordering_key(rank, FIRST_ITEM_SLOT + k as i32, stride);
                self.set_style(&self.items[index].element, "order", &key.to_string());
                self.items[index].order = Some(key);
            }
        }

        ranks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_keep_groups_apart() {
        assert_eq!(ordering_key(1, HEADER_SLOT, GROUP_STRIDE), 1001);
        assert_eq!(ordering_key(2, SPACER_SLOT, GROUP_STRIDE), 2000);
        assert!(ordering_key(1, FIRST_ITEM_SLOT + 900, GROUP_STRIDE) < ordering_key(2, SPACER_SLOT, GROUP_STRIDE));
    }

    #[test]
    fn column_count_from_grid_template() {
        assert_eq!(parse_column_count("320px 320px 320px"), Some(3));
        assert_eq!(parse_column_count(" 1fr "), Some(1));
        assert_eq!(parse_column_count("none"), None);
        assert_eq!(parse_column_count(""), None);
    }

    #[test]
    fn named_lines_are_not_columns() {
        assert_eq!(parse_column_count("[full-start] 1fr [full-end]"), Some(1));
        assert_eq!(parse_column_count("[a b] 200px [c] 200px [d]"), Some(2));
        assert_eq!(parse_column_count("minmax(100px, 1fr) 200px"), Some(2));
        assert_eq!(parse_column_count("[only-a-name]"), None);
    }

    #[test]
    fn stride_grows_with_large_groups() {
        assert_eq!(group_stride(0), GROUP_STRIDE);
        assert_eq!(group_stride(998), 1000);
        assert_eq!(group_stride(999), 2000);
        assert_eq!(group_stride(2500), 3000);
    }
}
