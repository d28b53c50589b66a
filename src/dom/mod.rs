//! Mutable HTML document tree.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]; parent/child links are
//! ids rather than pointers, which keeps detach/reinsert cheap and borrow
//! friendly. Documents are built by the html5ever-backed parser in [`parse`]
//! and written back to text by [`serialize`].

mod parse;
mod serialize;

pub use parse::parse_document;
pub use serialize::serialize;

use html5ever::QualName;

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Document type declaration, kept verbatim for re-serialization.
#[derive(Debug, Clone)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

/// An element with its tag name and attributes in source order.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: QualName,
    attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: QualName, attrs: Vec<(String, String)>) -> Self {
        Self { name, attrs }
    }

    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.name.local
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => value.clone_into(v),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove an attribute. Returns true if it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }

    /// Add an attribute only if absent (html5ever `add_attrs_if_missing`).
    pub fn add_attr_if_missing(&mut self, name: String, value: String) {
        if !self.attrs.iter().any(|(k, _)| *k == name) {
            self.attrs.push((name, value));
        }
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The document root; never has a parent.
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

/// A node in the arena: payload plus tree links.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// A parsed HTML document.
///
/// Detached nodes stay in the arena but are unreachable from the root; the
/// serializer only walks reachable nodes.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    pub doctype: Option<Doctype>,
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            doctype: None,
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Allocate a new detached node.
    pub fn push_node(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Element payload of a node, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.get(id).data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.get_mut(id).data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Sibling immediately before `id`, if any.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id).parent?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == id)?;
        pos.checked_sub(1).map(|i| siblings[i])
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    /// Insert `new` immediately before `sibling`.
    ///
    /// Returns false if `sibling` has no parent (detached or the root).
    pub fn insert_before(&mut self, sibling: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.get(sibling).parent else {
            return false;
        };
        self.detach(new);
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == sibling)
            .expect("sibling must be a child of its parent");
        self.get_mut(new).parent = Some(parent);
        self.get_mut(parent).children.insert(pos, new);
        true
    }

    /// Insert `new` immediately after `sibling`.
    ///
    /// Returns false if `sibling` has no parent (detached or the root).
    pub fn insert_after(&mut self, sibling: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.get(sibling).parent else {
            return false;
        };
        self.detach(new);
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == sibling)
            .expect("sibling must be a child of its parent");
        self.get_mut(new).parent = Some(parent);
        self.get_mut(parent).children.insert(pos + 1, new);
        true
    }

    /// Unlink a node from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).parent else {
            return;
        };
        self.get_mut(parent).children.retain(|&c| c != id);
        self.get_mut(id).parent = None;
    }

    /// Move all children of `from` to the end of `to`'s children.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let children = std::mem::take(&mut self.get_mut(from).children);
        for &child in &children {
            self.get_mut(child).parent = Some(to);
        }
        self.get_mut(to).children.extend(children);
    }

    /// All nodes below `id` in document (preorder) order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Whether `ancestor` is on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).parent;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).parent;
        }
        false
    }

    /// First element (preorder) satisfying the predicate.
    pub fn find_element(&self, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.element(id).is_some_and(&pred))
    }

    /// First element carrying `name="value"`.
    pub fn element_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.find_element(|el| el.attr(name) == Some(value))
    }

    /// The `<body>` element, if present.
    pub fn body(&self) -> Option<NodeId> {
        self.find_element(|el| el.tag() == "body")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detach_and_reinsert() {
        let mut doc = parse_document(
            "<body><ul id=\"list\"><li id=\"a\">a</li><li id=\"b\">b</li><li id=\"c\">c</li></ul></body>",
        );
        let a = doc.element_by_attr("id", "a").unwrap();
        let c = doc.element_by_attr("id", "c").unwrap();

        doc.detach(a);
        assert!(doc.get(a).parent.is_none());
        assert!(doc.insert_after(c, a));

        let list = doc.element_by_attr("id", "list").unwrap();
        let order: Vec<_> = doc
            .children(list)
            .iter()
            .filter_map(|&id| doc.element(id).and_then(|el| el.attr("id")))
            .collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn test_insert_before() {
        let mut doc = parse_document("<body><p id=\"x\">x</p><p id=\"y\">y</p></body>");
        let x = doc.element_by_attr("id", "x").unwrap();
        let y = doc.element_by_attr("id", "y").unwrap();

        doc.detach(y);
        assert!(doc.insert_before(x, y));

        let body = doc.body().unwrap();
        let order: Vec<_> = doc
            .children(body)
            .iter()
            .filter_map(|&id| doc.element(id).and_then(|el| el.attr("id")))
            .collect();
        assert_eq!(order, ["y", "x"]);
    }

    #[test]
    fn test_insert_relative_to_detached_fails() {
        let mut doc = parse_document("<body><p id=\"x\"></p><p id=\"y\"></p></body>");
        let x = doc.element_by_attr("id", "x").unwrap();
        let y = doc.element_by_attr("id", "y").unwrap();
        doc.detach(x);
        assert!(!doc.insert_before(x, y));
        assert!(!doc.insert_after(x, y));
    }

    #[test]
    fn test_is_ancestor() {
        let doc = parse_document("<body><div id=\"outer\"><p id=\"inner\">x</p></div></body>");
        let outer = doc.element_by_attr("id", "outer").unwrap();
        let inner = doc.element_by_attr("id", "inner").unwrap();
        let body = doc.body().unwrap();

        assert!(doc.is_ancestor(outer, inner));
        assert!(doc.is_ancestor(body, inner));
        assert!(!doc.is_ancestor(inner, outer));
        assert!(!doc.is_ancestor(outer, outer));
    }

    #[test]
    fn test_attr_roundtrip() {
        let mut doc = parse_document("<body><div class=\"card\">x</div></body>");
        let div = doc.find_element(|el| el.tag() == "div").unwrap();

        assert_eq!(doc.element(div).unwrap().attr("class"), Some("card"));

        let el = doc.element_mut(div).unwrap();
        el.set_attr("class", "panel");
        el.set_attr("data-editor-id", "el-123");
        assert_eq!(doc.element(div).unwrap().attr("class"), Some("panel"));
        assert_eq!(
            doc.element(div).unwrap().attr("data-editor-id"),
            Some("el-123")
        );

        assert!(doc.element_mut(div).unwrap().remove_attr("data-editor-id"));
        assert_eq!(doc.element(div).unwrap().attr("data-editor-id"), None);
        assert!(!doc.element_mut(div).unwrap().remove_attr("data-editor-id"));
    }

    #[test]
    fn test_body_lookup() {
        let doc = parse_document("<html><head><title>t</title></head><body><p>x</p></body></html>");
        let body = doc.body().unwrap();
        assert_eq!(doc.element(body).unwrap().tag(), "body");
    }

    #[test]
    fn test_descendants_preorder() {
        let doc = parse_document(
            "<body><div id=\"1\"><span id=\"2\"></span></div><p id=\"3\"></p></body>",
        );
        let body = doc.body().unwrap();
        let ids: Vec<_> = doc
            .descendants(body)
            .into_iter()
            .filter_map(|id| doc.element(id).and_then(|el| el.attr("id")))
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }
}
