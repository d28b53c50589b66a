//! HTML parsing via html5ever into the arena document.
//!
//! The [`DomSink`] implements html5ever's `TreeSink` over a `RefCell`-wrapped
//! [`Document`]; handles are arena ids, so tree surgery during parsing is a
//! matter of index bookkeeping.

use super::{Doctype, Document, Element, NodeData, NodeId};
use crate::debug;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    Attribute, LocalName, Namespace, QualName,
    interface::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink},
};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};

/// Parse an HTML document. Never fails; the parser recovers from malformed
/// markup the way browsers do.
pub fn parse_document(html: &str) -> Document {
    let sink = DomSink::new();
    html5ever::parse_document(sink, Default::default()).one(String::from(html))
}

/// TreeSink building the arena document.
pub struct DomSink {
    doc: RefCell<Document>,
    quirks_mode: Cell<QuirksMode>,
}

impl DomSink {
    pub fn new() -> Self {
        Self {
            doc: RefCell::new(Document::new()),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
        }
    }
}

/// Owned element name handed back to the parser.
///
/// Atoms are refcounted, so cloning out of the arena is cheap.
#[derive(Debug)]
pub struct OwnedElemName {
    ns: Namespace,
    local: LocalName,
}

impl ElemName for OwnedElemName {
    fn local_name(&self) -> &LocalName {
        &self.local
    }

    fn ns(&self) -> &Namespace {
        &self.ns
    }
}

impl TreeSink for DomSink {
    type Handle = NodeId;
    type Output = Document;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self.doc.into_inner()
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        debug!("html"; "parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        self.doc.borrow().root()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        let doc = self.doc.borrow();
        let el = doc
            .element(*target)
            .expect("elem_name called on non-element node");
        OwnedElemName {
            ns: el.name.ns.clone(),
            local: el.name.local.clone(),
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        self.doc
            .borrow_mut()
            .push_node(NodeData::Element(Element::new(name, attrs)))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.doc
            .borrow_mut()
            .push_node(NodeData::Comment(text.to_string()))
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle {
        // Processing instructions are rare in HTML; keep them as comments so
        // nothing is silently dropped on write-back.
        self.doc
            .borrow_mut()
            .push_node(NodeData::Comment(format!("?{target} {data}")))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => doc.append_child(*parent, node),
            NodeOrText::AppendText(text) => {
                // Merge with a trailing text node, as the HTML tree builder expects
                let last = doc.children(*parent).last().copied();
                if let Some(last) = last
                    && let NodeData::Text(existing) = &mut doc.get_mut(last).data
                {
                    existing.push_str(&text);
                    return;
                }
                let id = doc.push_node(NodeData::Text(text.to_string()));
                doc.append_child(*parent, id);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                doc.insert_before(*sibling, node);
            }
            NodeOrText::AppendText(text) => {
                let prev = doc.previous_sibling(*sibling);
                if let Some(prev) = prev
                    && let NodeData::Text(existing) = &mut doc.get_mut(prev).data
                {
                    existing.push_str(&text);
                    return;
                }
                let id = doc.push_node(NodeData::Text(text.to_string()));
                doc.insert_before(*sibling, id);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.doc.borrow().get(*element).parent.is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        self.doc.borrow_mut().doctype = Some(Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        });
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.quirks_mode.set(mode);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut doc = self.doc.borrow_mut();
        if let Some(el) = doc.element_mut(*target) {
            for attr in attrs {
                el.add_attr_if_missing(attr.name.local.to_string(), attr.value.to_string());
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.doc.borrow_mut().detach(*target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.doc.borrow_mut().reparent_children(*node, *new_parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_html_scaffold() {
        // The HTML tree builder always supplies html/head/body
        let doc = parse_document("<p>hello</p>");
        assert!(doc.find_element(|el| el.tag() == "html").is_some());
        assert!(doc.find_element(|el| el.tag() == "head").is_some());
        let body = doc.body().unwrap();
        let p = doc.children(body)[0];
        assert_eq!(doc.element(p).unwrap().tag(), "p");
    }

    #[test]
    fn test_parse_keeps_doctype() {
        let doc = parse_document("<!DOCTYPE html><html><body></body></html>");
        assert_eq!(doc.doctype.as_ref().unwrap().name, "html");
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let doc = parse_document("<body><div class=\"a b\" id=\"x\" hidden></div></body>");
        let div = doc.find_element(|el| el.tag() == "div").unwrap();
        let el = doc.element(div).unwrap();
        assert_eq!(el.attr("class"), Some("a b"));
        assert_eq!(el.attr("id"), Some("x"));
        assert_eq!(el.attr("hidden"), Some(""));
    }

    #[test]
    fn test_parse_merges_adjacent_text() {
        let doc = parse_document("<body><p>a&amp;b</p></body>");
        let p = doc.find_element(|el| el.tag() == "p").unwrap();
        let children = doc.children(p);
        assert_eq!(children.len(), 1);
        match &doc.get(children[0]).data {
            NodeData::Text(t) => assert_eq!(t, "a&b"),
            other => panic!("expected text node, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_recovers_from_bad_markup() {
        let doc = parse_document("<body><div><p>unclosed</body>");
        assert!(doc.find_element(|el| el.tag() == "div").is_some());
        assert!(doc.find_element(|el| el.tag() == "p").is_some());
    }
}
