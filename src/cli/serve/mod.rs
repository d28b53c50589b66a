//! Editor server: static site files plus the file-mutation endpoints.

mod api;
mod lifecycle;
mod path;
mod response;

use crate::config::Config;
use crate::embed::editor::{EDITOR_CSS, EDITOR_JS, SHELL_HTML, ShellVars};
use crate::utils::mime::types::{CSS, HTML, JAVASCRIPT};
use crate::{debug, editor, log};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Start the editor server (blocking until Ctrl+C).
pub fn run(config: &Config) -> Result<()> {
    // Ensure every body element carries a persistent editor id before the
    // first request can reference one
    let html_path = config.html_path();
    let added = editor::ids::initialize_ids(&html_path)?;
    if added > 0 {
        log!("edit"; "tagged {} element(s) in {}", added, html_path.display());
    } else {
        debug!("edit"; "editor ids already present in {}", html_path.display());
    }

    let bound = bind_server(config)?;
    log!("serve"; "site   http://{}{}", bound.addr(), config.page_url());
    log!("serve"; "editor http://{}/.forma/", bound.addr());
    bound.run(config)
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &Config) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    Ok(BoundServer { server, addr })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking).
    ///
    /// Requests are handled one at a time: every mutation is a whole-file
    /// read-modify-write, so sequential handling is what keeps the two
    /// source files consistent without locking.
    pub fn run(self, config: &Config) -> Result<()> {
        for request in self.server.incoming_requests() {
            if crate::core::is_shutdown() {
                break;
            }
            if let Err(e) = handle_request(request, config) {
                log!("serve"; "request error: {e}");
            }
        }
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &Config) -> Result<()> {
    let url = request.url().to_string();
    let route = url.split('?').next().unwrap_or(&url);

    match (request.method(), route) {
        // Editor UI from memory
        (Method::Get, "/.forma" | "/.forma/" | "/.forma/index.html") => {
            let body = SHELL_HTML.render(&ShellVars {
                page_url: &config.page_url(),
                version: env!("CARGO_PKG_VERSION"),
            });
            response::send_body(request, 200, HTML, body.into_bytes())
        }
        (Method::Get, "/.forma/editor.js") => {
            response::send_body(request, 200, JAVASCRIPT, EDITOR_JS.as_bytes().to_vec())
        }
        (Method::Get, "/.forma/editor.css") => {
            response::send_body(request, 200, CSS, EDITOR_CSS.as_bytes().to_vec())
        }

        // File-mutation endpoints
        (Method::Get, "/content") => response::respond_file(request, &config.html_path()),
        (Method::Get, "/clean") => api::handle_clean(request, config),
        (Method::Post, "/update-class") => api::handle_update_class(request, config),
        (Method::Post, "/reorder-node") => api::handle_reorder_node(request, config),

        // Everything else is a site file
        (Method::Get, _) => match path::resolve_path(route, &config.site_root()) {
            Some(file) => response::respond_file(request, &file),
            None => response::respond_not_found(request),
        },
        _ => response::respond_not_found(request),
    }
}
