//! Editor id removal ("publish" step).

use super::{EDITOR_ID_ATTR, EditorError};
use crate::dom;
use std::fs;
use std::path::Path;

/// Strip every editor id attribute from the HTML file.
///
/// Returns the number of attributes removed; the file is rewritten only when
/// something was removed.
pub fn strip_editor_ids(html_path: &Path) -> Result<usize, EditorError> {
    let source = fs::read_to_string(html_path)?;
    let mut doc = dom::parse_document(&source);

    let mut removed = 0;
    for id in doc.descendants(doc.root()) {
        if let Some(el) = doc.element_mut(id)
            && el.remove_attr(EDITOR_ID_ATTR)
        {
            removed += 1;
        }
    }

    if removed > 0 {
        fs::write(html_path, dom::serialize(&doc))?;
    }
    Ok(removed)
}
