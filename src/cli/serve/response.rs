//! HTTP response helpers.

use crate::editor::EditorError;
use crate::utils::mime;
use anyhow::Result;
use std::{fs, path::Path};
use tiny_http::{Header, Request, Response};

/// Serve a file from disk with its MIME type.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    match fs::read(path) {
        Ok(content) => send_body(request, 200, mime::from_path(path), content),
        Err(_) => respond_not_found(request),
    }
}

/// Send a JSON body.
pub fn respond_json(request: Request, status: u16, value: &serde_json::Value) -> Result<()> {
    let body = serde_json::to_vec(value)?;
    send_body(request, status, mime::types::JSON, body)
}

/// Map an editor mutation failure to its HTTP status with a JSON error body.
pub fn respond_editor_error(request: Request, error: &EditorError) -> Result<()> {
    let status = error.status();
    respond_json(
        request,
        status,
        &serde_json::json!({ "error": error.to_string() }),
    )
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(
        request,
        404,
        mime::types::PLAIN,
        b"404 Not Found".to_vec(),
    )
}

pub fn respond_bad_request(request: Request, message: &str) -> Result<()> {
    respond_json(request, 400, &serde_json::json!({ "error": message }))
}

/// Send a response with the given status, content type, and body.
pub fn send_body(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(status)
        .with_header(make_header("Content-Type", content_type)?)
        .with_header(make_header("Cache-Control", "no-store")?);
    request.respond(response)?;
    Ok(())
}

fn make_header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .map_err(|_| anyhow::anyhow!("Invalid header: {field}: {value}"))
}
