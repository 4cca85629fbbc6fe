// ── DOM port ──
//
// Rendering helpers never touch a browser directly. They go through the
// `Dom` trait, which models the handful of document operations they need.
// `MemoryDom` is the in-process implementation: a node arena behind a
// mutex that can serialize itself back to markup.

use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

/// Handle to a node owned by a [`Dom`].
///
/// Handles are generational: once a node is discarded its slot can be
/// reused, and old handles to it resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

const ROOT: NodeId = NodeId {
    index: 0,
    generation: 0,
};

/// Document operations used by the rendering helpers.
///
/// Methods take `&self`; implementations use interior mutability so a
/// single handle can be shared between the toast surface, timers and page
/// code. Operations on unknown or detached nodes are no-ops.
pub trait Dom: Send + Sync {
    /// Root element every attached node descends from.
    fn body(&self) -> NodeId;

    /// First attached element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> NodeId;

    /// Move `child` to the end of `parent`'s children.
    fn append_child(&self, parent: NodeId, child: NodeId);

    /// Move `node` to immediately after `reference` in its parent.
    fn insert_after(&self, reference: NodeId, node: NodeId);

    /// Detach `node` from its parent. The node stays usable and can be
    /// inserted again.
    fn remove(&self, node: NodeId);

    /// Detach `node` and drop it with its whole subtree.
    ///
    /// Handles to dropped nodes go stale and behave like unknown nodes.
    fn discard(&self, node: NodeId) {
        self.remove(node);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Lowercase tag name, `None` for text and markup nodes.
    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&self, node: NodeId, name: &str);

    /// Replace all children with a single text node.
    fn set_text(&self, node: NodeId, text: &str);

    /// Append a text node.
    fn append_text(&self, node: NodeId, text: &str);

    /// Replace all children with a markup fragment emitted verbatim.
    fn set_inner_html(&self, node: NodeId, markup: &str);

    /// Current value of a form control.
    fn value(&self, node: NodeId) -> String;

    /// Set the current value; `None` restores the default.
    fn set_value(&self, node: NodeId, value: Option<&str>);

    /// Current checked state of a checkbox or radio.
    fn is_checked(&self, node: NodeId) -> bool;

    /// Set the checked state; `None` restores the default.
    fn set_checked(&self, node: NodeId, checked: Option<bool>);

    // ── Provided ─────────────────────────────────────────────────────

    /// Discard every child.
    fn clear(&self, node: NodeId) {
        for child in self.children(node) {
            self.discard(child);
        }
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    fn add_class(&self, node: NodeId, class: &str) {
        let mut classes = self.classes(node);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
            self.set_attribute(node, "class", &classes.join(" "));
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        let classes = self.classes(node);
        if classes.iter().any(|c| c == class) {
            let kept: Vec<_> = classes.into_iter().filter(|c| c != class).collect();
            if kept.is_empty() {
                self.remove_attribute(node, "class");
            } else {
                self.set_attribute(node, "class", &kept.join(" "));
            }
        }
    }

    /// All nodes below `root` in document order.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    /// Elements below `root` carrying `class`.
    fn elements_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Whether `node` is reachable from [`body`](Dom::body).
    fn is_attached(&self, node: NodeId) -> bool {
        let body = self.body();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == body {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}

/// Escape text for inclusion in markup or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── MemoryDom ────────────────────────────────────────────────────────

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attrs: IndexMap<String, String>,
    },
    Text(String),
    Markup(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    value: Option<String>,
    checked: Option<bool>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            value: None,
            checked: None,
        }
    }

    fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug)]
struct Tree {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Tree {
    fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node::new(kind);
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = Some(node);
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Detach `id` and free it together with its descendants.
    fn release(&mut self, id: NodeId) {
        if id == ROOT {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index)
                .filter(|s| s.generation == current.generation)
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            stack.extend(node.children);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(n) = self.get_mut(id) {
            n.parent = None;
        }
    }

    /// `true` if `ancestor` is `node` or one of its parents.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.get(n).and_then(|n| n.parent);
        }
        false
    }

    fn replace_children(&mut self, node: NodeId, kind: Option<NodeKind>) {
        if self.get(node).is_none() {
            return;
        }
        let old = self
            .get_mut(node)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in old {
            self.free_subtree(child);
        }
        if let Some(kind) = kind {
            let child = self.push(kind);
            self.attach(node, child);
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.kind {
            NodeKind::Text(t) | NodeKind::Markup(t) => out.push_str(t),
            NodeKind::Element { .. } => {
                for &child in &node.children {
                    self.text_content(child, out);
                }
            }
        }
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.kind {
            NodeKind::Text(t) => out.push_str(&escape_html(t)),
            NodeKind::Markup(m) => out.push_str(m),
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for &child in &node.children {
                    self.write_html(child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }

    fn default_value(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match node.tag() {
            Some("textarea") => {
                let mut out = String::new();
                self.text_content(id, &mut out);
                out
            }
            Some("select") => {
                let options: Vec<NodeId> = node
                    .children
                    .iter()
                    .copied()
                    .filter(|&c| self.get(c).and_then(Node::tag) == Some("option"))
                    .collect();
                let chosen = options
                    .iter()
                    .copied()
                    .find(|&o| self.get(o).is_some_and(|n| n.attr("selected").is_some()))
                    .or_else(|| options.first().copied());
                chosen.map(|o| self.option_value(o)).unwrap_or_default()
            }
            Some("input") => match node.attr("value") {
                Some(v) => v.to_owned(),
                None if matches!(node.attr("type"), Some("checkbox" | "radio")) => "on".into(),
                None => String::new(),
            },
            _ => node.attr("value").unwrap_or_default().to_owned(),
        }
    }

    fn option_value(&self, option: NodeId) -> String {
        if let Some(v) = self.get(option).and_then(|n| n.attr("value")) {
            return v.to_owned();
        }
        let mut out = String::new();
        self.text_content(option, &mut out);
        out
    }
}

/// In-memory document.
///
/// The root is a `<body>` element. Nodes live in a slot arena: a removed
/// node keeps its slot until it is discarded, either directly or because a
/// parent was cleared or had its content replaced. Freed slots are reused.
#[derive(Debug)]
pub struct MemoryDom {
    tree: Mutex<Tree>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut tree = Tree {
            slots: Vec::new(),
            free: Vec::new(),
        };
        tree.push(NodeKind::Element {
            tag: "body".into(),
            attrs: IndexMap::new(),
        });
        Self {
            tree: Mutex::new(tree),
        }
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an element with attributes and append it to `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(node, name, value);
        }
        self.append_child(parent, node);
        node
    }

    /// Number of arena slots, live or waiting for reuse.
    pub fn slot_count(&self) -> usize {
        self.tree().slots.len()
    }

    /// Number of nodes currently allocated, attached or not.
    pub fn live_nodes(&self) -> usize {
        let tree = self.tree();
        tree.slots.len() - tree.free.len()
    }

    /// Serialized markup of `node`'s children.
    pub fn inner_html(&self, node: NodeId) -> String {
        let tree = self.tree();
        let mut out = String::new();
        if let Some(n) = tree.get(node) {
            for &child in &n.children {
                tree.write_html(child, &mut out);
            }
        }
        out
    }

    /// Serialized markup of `node` itself.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree().write_html(node, &mut out);
        out
    }

    /// Concatenated text of `node` and its descendants (markup verbatim).
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree().text_content(node, &mut out);
        out
    }
}

impl Dom for MemoryDom {
    fn body(&self) -> NodeId {
        ROOT
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree();
        let mut stack = vec![self.body()];
        while let Some(node) = stack.pop() {
            let n = tree.get(node)?;
            if n.attr("id") == Some(id) {
                return Some(node);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        None
    }

    fn create_element(&self, tag: &str) -> NodeId {
        self.tree().push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: IndexMap::new(),
        })
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree();
        if tree.get(parent).is_none() || tree.get(child).is_none() || tree.is_ancestor(child, parent)
        {
            return;
        }
        tree.detach(child);
        tree.attach(parent, child);
    }

    fn insert_after(&self, reference: NodeId, node: NodeId) {
        let mut tree = self.tree();
        let Some(parent) = tree.get(reference).and_then(|n| n.parent) else {
            return;
        };
        if reference == node || tree.get(node).is_none() || tree.is_ancestor(node, parent) {
            return;
        }
        tree.detach(node);
        let Some(index) = tree
            .get(parent)
            .and_then(|p| p.children.iter().position(|&c| c == reference))
        else {
            return;
        };
        if let Some(p) = tree.get_mut(parent) {
            p.children.insert(index + 1, node);
        }
        if let Some(n) = tree.get_mut(node) {
            n.parent = Some(parent);
        }
    }

    fn remove(&self, node: NodeId) {
        self.tree().detach(node);
    }

    fn discard(&self, node: NodeId) {
        self.tree().release(node);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree().get(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree()
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.tree();
        let parent = tree.get(node)?.parent?;
        let siblings = &tree.get(parent)?.children;
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.tree().get(node).and_then(Node::tag).map(String::from)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree()
            .get(node)
            .and_then(|n| n.attr(name))
            .map(String::from)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(Node {
            kind: NodeKind::Element { attrs, .. },
            ..
        }) = self.tree().get_mut(node)
        {
            attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(Node {
            kind: NodeKind::Element { attrs, .. },
            ..
        }) = self.tree().get_mut(node)
        {
            attrs.shift_remove(name);
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.tree()
            .replace_children(node, Some(NodeKind::Text(text.to_owned())));
    }

    fn append_text(&self, node: NodeId, text: &str) {
        let mut tree = self.tree();
        if tree.get(node).is_some() {
            let child = tree.push(NodeKind::Text(text.to_owned()));
            tree.attach(node, child);
        }
    }

    fn set_inner_html(&self, node: NodeId, markup: &str) {
        let kind = (!markup.is_empty()).then(|| NodeKind::Markup(markup.to_owned()));
        self.tree().replace_children(node, kind);
    }

    fn value(&self, node: NodeId) -> String {
        let tree = self.tree();
        match tree.get(node).and_then(|n| n.value.clone()) {
            Some(v) => v,
            None => tree.default_value(node),
        }
    }

    fn set_value(&self, node: NodeId, value: Option<&str>) {
        if let Some(n) = self.tree().get_mut(node) {
            n.value = value.map(String::from);
        }
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.tree()
            .get(node)
            .is_some_and(|n| n.checked.unwrap_or_else(|| n.attr("checked").is_some()))
    }

    fn set_checked(&self, node: NodeId, checked: Option<bool>) {
        if let Some(n) = self.tree().get_mut(node) {
            n.checked = checked;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn element_lookup_ignores_detached_nodes() {
        let dom = MemoryDom::new();
        let div = dom.append_element(dom.body(), "div", &[("id", "panel")]);
        assert_eq!(dom.element_by_id("panel"), Some(div));

        dom.remove(div);
        assert_eq!(dom.element_by_id("panel"), None);
        assert!(!dom.is_attached(div));
    }

    #[test]
    fn serializes_with_escaping() {
        let dom = MemoryDom::new();
        let p = dom.append_element(dom.body(), "p", &[("title", "a \"b\"")]);
        dom.set_text(p, "1 < 2 & 3");
        let span = dom.append_element(dom.body(), "span", &[]);
        dom.set_inner_html(span, "<b>raw</b>");

        assert_eq!(
            dom.inner_html(dom.body()),
            "<p title=\"a &quot;b&quot;\">1 &lt; 2 &amp; 3</p><span><b>raw</b></span>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let dom = MemoryDom::new();
        let input = dom.append_element(dom.body(), "input", &[("name", "q")]);
        assert_eq!(dom.outer_html(input), "<input name=\"q\">");
    }

    #[test]
    fn insert_after_places_node_next_to_reference() {
        let dom = MemoryDom::new();
        let a = dom.append_element(dom.body(), "a", &[]);
        let c = dom.append_element(dom.body(), "c", &[]);
        let b = dom.create_element("b");

        dom.insert_after(a, b);
        assert_eq!(dom.children(dom.body()), vec![a, b, c]);
        assert_eq!(dom.next_sibling(a), Some(b));
        assert_eq!(dom.next_sibling(c), None);
    }

    #[test]
    fn append_child_refuses_cycles() {
        let dom = MemoryDom::new();
        let outer = dom.append_element(dom.body(), "div", &[]);
        let inner = dom.append_element(outer, "div", &[]);

        dom.append_child(inner, outer);
        assert_eq!(dom.parent(outer), Some(dom.body()));
        assert_eq!(dom.parent(inner), Some(outer));
    }

    #[test]
    fn class_helpers_round_trip() {
        let dom = MemoryDom::new();
        let el = dom.append_element(dom.body(), "div", &[("class", "a  b")]);

        dom.add_class(el, "c");
        dom.add_class(el, "a");
        assert_eq!(dom.attribute(el, "class").as_deref(), Some("a b c"));

        dom.remove_class(el, "a");
        dom.remove_class(el, "b");
        dom.remove_class(el, "c");
        assert_eq!(dom.attribute(el, "class"), None);
    }

    #[test]
    fn control_values_fall_back_to_defaults() {
        let dom = MemoryDom::new();
        let text = dom.append_element(dom.body(), "input", &[("value", "x")]);
        let check = dom.append_element(dom.body(), "input", &[("type", "checkbox")]);
        let area = dom.append_element(dom.body(), "textarea", &[]);
        dom.set_text(area, "notes");
        let select = dom.append_element(dom.body(), "select", &[]);
        dom.append_element(select, "option", &[("value", "a")]);
        dom.append_element(select, "option", &[("value", "b"), ("selected", "")]);

        assert_eq!(dom.value(text), "x");
        assert_eq!(dom.value(check), "on");
        assert_eq!(dom.value(area), "notes");
        assert_eq!(dom.value(select), "b");

        dom.set_value(text, Some("y"));
        assert_eq!(dom.value(text), "y");
        dom.set_value(text, None);
        assert_eq!(dom.value(text), "x");
    }

    #[test]
    fn discarded_subtree_is_recycled_and_handles_go_stale() {
        let dom = MemoryDom::new();
        let list = dom.append_element(dom.body(), "ul", &[("id", "list")]);
        let item = dom.append_element(list, "li", &[]);
        dom.set_text(item, "one");
        assert_eq!(dom.live_nodes(), 4);

        dom.discard(list);
        assert_eq!(dom.live_nodes(), 1);
        assert_eq!(dom.element_by_id("list"), None);
        assert_eq!(dom.tag_name(item), None);
        assert_eq!(dom.parent(item), None);

        let slots = dom.slot_count();
        let fresh = dom.append_element(dom.body(), "p", &[]);
        assert_eq!(dom.slot_count(), slots);
        assert_ne!(fresh, list);
        assert_ne!(fresh, item);
        dom.set_attribute(item, "class", "stale");
        assert_eq!(dom.attribute(fresh, "class"), None);
    }

    #[test]
    fn removed_node_survives_until_discarded() {
        let dom = MemoryDom::new();
        let div = dom.append_element(dom.body(), "div", &[]);
        dom.remove(div);
        assert_eq!(dom.tag_name(div).as_deref(), Some("div"));

        dom.append_child(dom.body(), div);
        assert!(dom.is_attached(div));
    }

    #[test]
    fn body_cannot_be_discarded() {
        let dom = MemoryDom::new();
        dom.discard(dom.body());
        assert_eq!(dom.tag_name(dom.body()).as_deref(), Some("body"));
    }

    #[test]
    fn replacing_content_frees_old_children() {
        let dom = MemoryDom::new();
        let p = dom.append_element(dom.body(), "p", &[]);
        dom.set_text(p, "a");
        let before = dom.live_nodes();
        for i in 0..100 {
            dom.set_text(p, &i.to_string());
        }
        assert_eq!(dom.live_nodes(), before);
        assert_eq!(dom.text_content(p), "99");
    }

    #[test]
    fn descendants_are_in_document_order() {
        let dom = MemoryDom::new();
        let a = dom.append_element(dom.body(), "div", &[]);
        let a1 = dom.append_element(a, "span", &[]);
        let b = dom.append_element(dom.body(), "div", &[]);

        assert_eq!(dom.descendants(dom.body()), vec![a, a1, b]);
    }
}
