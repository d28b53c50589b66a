//! DOM node reordering.
//!
//! Detach one node and reinsert it relative to another, both resolved by
//! editor id. Positions mirror the drop indicator in the browser overlay.

use super::{EDITOR_ID_ATTR, EditorError};
use crate::dom::{self, Document};
use crate::utils::html::is_void_element;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Insertion position relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
    Inside,
}

/// Move the node `moved_id` relative to `target_id`.
///
/// Moving a node into its own subtree (or onto itself) is rejected; the
/// detach would otherwise orphan the target and corrupt the document.
/// Moving inside a void element is rejected too: void elements have no
/// children on write-back, so the node would vanish from the file.
pub fn move_node(
    doc: &mut Document,
    moved_id: &str,
    target_id: &str,
    position: Position,
) -> Result<(), EditorError> {
    let moved = doc
        .element_by_attr(EDITOR_ID_ATTR, moved_id)
        .ok_or_else(|| EditorError::UnknownId(moved_id.to_string()))?;
    let target = doc
        .element_by_attr(EDITOR_ID_ATTR, target_id)
        .ok_or_else(|| EditorError::UnknownId(target_id.to_string()))?;

    if moved == target || doc.is_ancestor(moved, target) {
        return Err(EditorError::CyclicMove);
    }

    let ok = match position {
        Position::Before => doc.insert_before(target, moved),
        Position::After => doc.insert_after(target, moved),
        Position::Inside => {
            if let Some(el) = doc.element(target)
                && is_void_element(el.tag())
            {
                return Err(EditorError::VoidTarget(el.tag().to_string()));
            }
            doc.append_child(target, moved);
            true
        }
    };
    if !ok {
        return Err(EditorError::UnknownId(target_id.to_string()));
    }
    Ok(())
}

/// Apply a reorder to the HTML file on disk.
pub fn reorder_node(
    html_path: &Path,
    moved_id: &str,
    target_id: &str,
    position: Position,
) -> Result<(), EditorError> {
    let source = fs::read_to_string(html_path)?;
    let mut doc = dom::parse_document(&source);
    move_node(&mut doc, moved_id, target_id, position)?;
    fs::write(html_path, dom::serialize(&doc))?;
    Ok(())
}
