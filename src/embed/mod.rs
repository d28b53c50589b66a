//! Embedded static resources for the editor UI.
//!
//! The editor shell, script, and stylesheet are compiled into the binary and
//! served under `/.forma/`; only the shell carries injected variables.
//!
//! # Usage
//!
//! ```ignore
//! use embed::editor::{SHELL_HTML, ShellVars};
//!
//! let html = SHELL_HTML.render(&ShellVars { page_url: "/index.html", version: "0.1.0" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod editor {
    use super::{Template, TemplateVars};

    /// Variables for editor.html.
    pub struct ShellVars<'a> {
        /// URL of the page loaded into the preview iframe.
        pub page_url: &'a str,
        pub version: &'a str,
    }

    impl TemplateVars for ShellVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__FORMA_PAGE_URL__", self.page_url)
                .replace("__VERSION__", self.version)
        }
    }

    /// Editor shell page (iframe preview + sidebar + overlay).
    pub const SHELL_HTML: Template<ShellVars<'static>> =
        Template::new(include_str!("editor/editor.html"));

    /// Editor interaction script (selection, sidebar sync, drag reorder).
    pub const EDITOR_JS: &str = include_str!("editor/editor.js");

    /// Editor shell stylesheet.
    pub const EDITOR_CSS: &str = include_str!("editor/editor.css");
}
