//! Editor identifier initialization.
//!
//! Every element under `<body>` carries a unique `data-editor-id` once the
//! server has started; the identifier is the sole correlation key between a
//! browser selection and a node on disk. Identifiers are assigned once and
//! persist across edits.

use super::{EDITOR_ID_ATTR, EditorError};
use crate::dom::{self, Document};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Tag all untagged body elements. Returns the number of ids added.
pub fn ensure_editor_ids(doc: &mut Document, seed: &str) -> usize {
    let Some(body) = doc.body() else { return 0 };

    // Existing ids anywhere in the document are reserved
    let mut taken: FxHashSet<String> = doc
        .descendants(doc.root())
        .into_iter()
        .filter_map(|id| {
            doc.element(id)
                .and_then(|el| el.attr(EDITOR_ID_ATTR))
                .map(str::to_string)
        })
        .collect();

    let mut added = 0;
    let mut counter = 0usize;
    for id in doc.descendants(body) {
        let needs_id = doc
            .element(id)
            .is_some_and(|el| el.attr(EDITOR_ID_ATTR).is_none());
        if !needs_id {
            continue;
        }

        let fresh = loop {
            let candidate = generate_id(seed, counter);
            counter += 1;
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };

        if let Some(el) = doc.element_mut(id) {
            el.set_attr(EDITOR_ID_ATTR, &fresh);
            added += 1;
        }
    }
    added
}

/// Derive a short identifier from the seed and a sequence number.
///
/// 9 hex chars of a blake3 digest; collisions against ids already in the
/// document are re-probed by the caller.
fn generate_id(seed: &str, n: usize) -> String {
    let digest = blake3::hash(format!("{seed}#{n}").as_bytes());
    let hex = hex::encode(&digest.as_bytes()[..5]);
    format!("el-{}", &hex[..9])
}

/// Assign missing editor ids in the HTML file on disk.
///
/// Rewrites the file only when something changed, so repeated startups leave
/// it untouched. Returns the number of ids added.
pub fn initialize_ids(html_path: &Path) -> Result<usize, EditorError> {
    let source = fs::read_to_string(html_path)?;
    let mut doc = dom::parse_document(&source);
    let added = ensure_editor_ids(&mut doc, &html_path.display().to_string());
    if added > 0 {
        fs::write(html_path, dom::serialize(&doc))?;
    }
    Ok(added)
}
