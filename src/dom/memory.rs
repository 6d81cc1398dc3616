//! In-memory document
//!
//! An arena of element nodes with just enough behaviour to exercise the
//! filter engine off the browser: attribute and class storage, inline styles
//! layered over a per-node "stylesheet", element sizes for bounding-box
//! checks, and document offsets for scroll targets.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::selector::SimpleSelector;
use super::{DomError, HostDocument};

/// Handle to a node of a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const DEFAULT_SIZE: (f64, f64) = (100.0, 20.0);

#[derive(Debug, Clone)]
struct MemoryNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    /// Text owned by this node itself (children contribute their own)
    text: String,
    inline: BTreeMap<String, String>,
    /// Values a stylesheet would resolve when no inline style is set
    sheet: BTreeMap<String, String>,
    size: (f64, f64),
    top: f64,
    value: String,
}

impl MemoryNode {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            inline: BTreeMap::new(),
            sheet: BTreeMap::new(),
            size: DEFAULT_SIZE,
            top: 0.0,
            value: String::new(),
        }
    }

    fn classes(&self) -> Vec<String> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.attributes.remove("class");
        } else {
            self.attributes.insert("class".to_string(), classes.join(" "));
        }
    }
}

/// Arena-backed document rooted at a `BODY` element
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: RefCell<Vec<MemoryNode>>,
    root: NodeId,
    clock: Cell<f64>,
    scroll_top: Cell<Option<f64>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![MemoryNode::new("body")]),
            root: NodeId(0),
            clock: Cell::new(0.0),
            scroll_top: Cell::new(None),
        }
    }

    pub fn body(&self) -> NodeId {
        self.root
    }

    /// Create an element with attributes and append it to `parent`
    pub fn add(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.alloc(MemoryNode::new(tag));
        {
            let mut nodes = self.nodes.borrow_mut();
            for (name, value) in attributes {
                nodes[id.0]
                    .attributes
                    .insert((*name).to_string(), (*value).to_string());
            }
        }
        self.attach(parent, id, None);
        id
    }

    /// Create an element holding `text` and append it to `parent`
    pub fn add_text(
        &self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let id = self.add(parent, tag, attributes);
        self.nodes.borrow_mut()[id.0].text = text.to_string();
        id
    }

    /// Simulate a stylesheet rule applying to one element
    pub fn set_sheet_style(&self, node: NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .sheet
            .insert(property.to_string(), value.to_string());
    }

    pub fn set_size(&self, node: NodeId, width: f64, height: f64) {
        self.nodes.borrow_mut()[node.0].size = (width, height);
    }

    pub fn set_top(&self, node: NodeId, top: f64) {
        self.nodes.borrow_mut()[node.0].top = top;
    }

    pub fn advance_clock(&self, ms: f64) {
        self.clock.set(self.clock.get() + ms);
    }

    /// Last offset passed to [`HostDocument::scroll_to`]
    pub fn last_scroll(&self) -> Option<f64> {
        self.scroll_top.get()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    fn alloc(&self, node: MemoryNode) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        NodeId(nodes.len() - 1)
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn attach(&self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        self.detach(node);
        let mut nodes = self.nodes.borrow_mut();
        let position = reference
            .and_then(|r| nodes[parent.0].children.iter().position(|c| *c == r))
            .unwrap_or(nodes[parent.0].children.len());
        nodes[parent.0].children.insert(position, node);
        nodes[node.0].parent = Some(parent);
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn node_matches(&self, node: NodeId, selector: &SimpleSelector) -> bool {
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        if let Some(tag) = &selector.tag {
            if *tag != data.tag {
                return false;
            }
        }
        let classes = data.classes();
        if !selector.classes.iter().all(|c| classes.contains(c)) {
            return false;
        }
        selector.attributes.iter().all(|cond| {
            match (data.attributes.get(&cond.name), &cond.value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            }
        })
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Ok(parsed) = SimpleSelector::parse(selector) else {
            log::warn!("Unsupported selector in memory document: {}", selector);
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|id| self.node_matches(*id, &parsed))
            .collect()
    }

    fn effective_display(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        data.inline
            .get("display")
            .or_else(|| data.sheet.get("display"))
            .cloned()
            .unwrap_or_else(|| "block".to_string())
    }

    fn copy_subtree(&self, node: NodeId) -> NodeId {
        let (mut copy, children) = {
            let nodes = self.nodes.borrow();
            (nodes[node.0].clone(), nodes[node.0].children.clone())
        };
        copy.parent = None;
        copy.children = Vec::new();
        let id = self.alloc(copy);
        for child in children {
            let child_copy = self.copy_subtree(child);
            self.attach(id, child_copy, None);
        }
        id
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for MemoryDocument {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root, selector)
    }

    fn query_all_within(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*root, selector)
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        SimpleSelector::parse(selector)
            .map(|parsed| self.node_matches(*node, &parsed))
            .unwrap_or(false)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    fn text(&self, node: &NodeId) -> String {
        let mut text = self.nodes.borrow()[node.0].text.clone();
        for child in self.children(*node) {
            text.push_str(&self.text(&child));
        }
        text
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        for child in self.children(*node) {
            self.detach(child);
        }
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let mut nodes = self.nodes.borrow_mut();
        let data = nodes
            .get_mut(node.0)
            .ok_or_else(|| DomError::StaleNode(format!("{:?}", node)))?;
        data.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.nodes.borrow_mut()[node.0].attributes.remove(name);
    }

    fn class_names(&self, node: &NodeId) -> Vec<String> {
        self.nodes.borrow()[node.0].classes()
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let mut classes = nodes[node.0].classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            nodes[node.0].set_classes(&classes);
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let mut classes = nodes[node.0].classes();
        classes.retain(|c| c != class);
        nodes[node.0].set_classes(&classes);
    }

    fn inline_style(&self, node: &NodeId, property: &str) -> String {
        self.nodes.borrow()[node.0]
            .inline
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_inline_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if value.is_empty() {
            nodes[node.0].inline.remove(property);
        } else {
            nodes[node.0]
                .inline
                .insert(property.to_string(), value.to_string());
        }
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> String {
        if property == "display" {
            return self.effective_display(*node);
        }
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        data.inline
            .get(property)
            .or_else(|| data.sheet.get(property))
            .cloned()
            .unwrap_or_default()
    }

    fn bounding_area(&self, node: &NodeId) -> f64 {
        if !self.is_attached(*node) {
            return 0.0;
        }
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.effective_display(id) == "none" {
                return 0.0;
            }
            current = self.parent(&id);
        }
        let (width, height) = self.nodes.borrow()[node.0].size;
        width * height
    }

    fn document_top(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[node.0].top
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_top.set(Some(top));
    }

    fn now_ms(&self) -> f64 {
        self.clock.get()
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() {
            return Err(DomError::operation("createElement", "empty tag name"));
        }
        Ok(self.alloc(MemoryNode::new(tag)))
    }

    fn clone_deep(&self, node: &NodeId) -> Result<NodeId, DomError> {
        Ok(self.copy_subtree(*node))
    }

    fn insert_before(
        &self,
        parent: &NodeId,
        node: &NodeId,
        reference: Option<&NodeId>,
    ) -> Result<(), DomError> {
        if let Some(reference) = reference {
            if self.parent(reference) != Some(*parent) {
                return Err(DomError::operation(
                    "insertBefore",
                    "reference node is not a child of parent",
                ));
            }
        }
        self.attach(*parent, *node, reference.copied());
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        self.detach(*node);
    }

    fn input_value(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].value.clone()
    }

    fn set_input_value(&self, node: &NodeId, value: &str) {
        self.nodes.borrow_mut()[node.0].value = value.to_string();
    }
}
