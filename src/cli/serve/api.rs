//! Mutation endpoints: each one is a whole-file read-modify-write.

use super::response;
use crate::config::Config;
use crate::editor::reorder::Position;
use crate::editor::{clean, reorder, style};
use crate::log;
use anyhow::Result;
use serde::Deserialize;
use std::io;
use tiny_http::Request;

#[derive(Deserialize)]
struct UpdateClass {
    id: String,
    property: String,
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderNode {
    moved_id: String,
    target_id: String,
    position: Position,
}

/// POST /update-class: persist one style declaration to the stylesheet.
pub fn handle_update_class(mut request: Request, config: &Config) -> Result<()> {
    let body: UpdateClass = match read_json(&mut request) {
        Ok(body) => body,
        Err(e) => return response::respond_bad_request(request, &e.to_string()),
    };

    match style::update_class(
        &config.html_path(),
        &config.css_path(),
        &body.id,
        &body.property,
        &body.value,
    ) {
        Ok(class) => {
            log!("edit"; ".{} {{ {}: {} }}", class, body.property, body.value);
            response::respond_json(
                request,
                200,
                &serde_json::json!({ "class": class }),
            )
        }
        Err(e) => response::respond_editor_error(request, &e),
    }
}

/// POST /reorder-node: move an element relative to another.
pub fn handle_reorder_node(mut request: Request, config: &Config) -> Result<()> {
    let body: ReorderNode = match read_json(&mut request) {
        Ok(body) => body,
        Err(e) => return response::respond_bad_request(request, &e.to_string()),
    };

    match reorder::reorder_node(
        &config.html_path(),
        &body.moved_id,
        &body.target_id,
        body.position,
    ) {
        Ok(()) => {
            log!("edit"; "moved {} {:?} {}", body.moved_id, body.position, body.target_id);
            response::respond_json(request, 200, &serde_json::json!({ "ok": true }))
        }
        Err(e) => response::respond_editor_error(request, &e),
    }
}

/// GET /clean: strip editor identifiers from the HTML file.
pub fn handle_clean(request: Request, config: &Config) -> Result<()> {
    match clean::strip_editor_ids(&config.html_path()) {
        Ok(removed) => {
            log!("edit"; "removed {} editor id(s)", removed);
            response::respond_json(
                request,
                200,
                &serde_json::json!({ "removed": removed }),
            )
        }
        Err(e) => response::respond_editor_error(request, &e),
    }
}

/// Read and deserialize a JSON request body.
fn read_json<T: for<'de> Deserialize<'de>>(request: &mut Request) -> Result<T> {
    let body = io::read_to_string(request.as_reader())?;
    Ok(serde_json::from_str(&body)?)
}
