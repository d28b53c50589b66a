//! Document serialization back to HTML text.
//!
//! Inverse of [`super::parse`]: void elements get no end tag, raw text
//! elements (script/style) are emitted verbatim, everything else is escaped.

use super::{Document, NodeData, NodeId};
use crate::utils::html::{escape, escape_attr, is_raw_text_element, is_void_element};

/// Serialize a document to HTML source.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    if let Some(doctype) = &doc.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(&doctype.name);
        if !doctype.public_id.is_empty() {
            out.push_str(" PUBLIC \"");
            out.push_str(&doctype.public_id);
            out.push('"');
            if !doctype.system_id.is_empty() {
                out.push_str(" \"");
                out.push_str(&doctype.system_id);
                out.push('"');
            }
        } else if !doctype.system_id.is_empty() {
            out.push_str(" SYSTEM \"");
            out.push_str(&doctype.system_id);
            out.push('"');
        }
        out.push_str(">\n");
    }
    for &child in doc.children(doc.root()) {
        write_node(doc, child, &mut out, false);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String, raw_text: bool) {
    match &doc.get(id).data {
        NodeData::Document => {
            for &child in doc.children(id) {
                write_node(doc, child, out, raw_text);
            }
        }
        NodeData::Element(el) => {
            let tag = el.tag();
            out.push('<');
            out.push_str(tag);
            for (name, value) in el.attrs() {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }
            out.push('>');

            if is_void_element(tag) {
                return;
            }

            let raw_children = is_raw_text_element(tag);
            for &child in doc.children(id) {
                write_node(doc, child, out, raw_children);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape(text));
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
