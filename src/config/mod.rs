//! Configuration loading and CLI overrides.
//!
//! Settings come from `forma.toml` next to the site (or the path given via
//! `-C/--config`), with CLI flags taking precedence. All sections have
//! defaults so the file is optional.
//!
//! # Example
//!
//! ```toml
//! [site]
//! root = "public"         # directory served over HTTP
//! html = "index.html"     # document being edited, relative to root
//! css = "style.css"       # stylesheet being edited, relative to root
//!
//! [serve]
//! interface = "127.0.0.1" # 0.0.0.0 makes the editor LAN accessible
//! port = 3000
//! ```

mod serve;
mod site;

pub use serve::ServeConfig;
pub use site::SiteConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub site: SiteConfig,
    pub serve: ServeConfig,

    /// Directory the config file lives in; relative site paths resolve
    /// against it.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Config {
    /// Load configuration from the CLI-selected file and apply CLI overrides.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.is_file() {
            let raw = std::fs::read_to_string(&cli.config)
                .with_context(|| format!("failed to read {}", cli.config.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("invalid config in {}", cli.config.display()))?
        } else {
            Self::default()
        };

        config.base_dir = cli
            .config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        config.apply_cli(cli);
        Ok(config)
    }

    /// Apply CLI flag overrides on top of the file values.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
        }
    }

    /// Directory served over HTTP.
    pub fn site_root(&self) -> PathBuf {
        self.base_dir.join(&self.site.root)
    }

    /// Absolute-ish path of the HTML document being edited.
    pub fn html_path(&self) -> PathBuf {
        self.site_root().join(&self.site.html)
    }

    /// Absolute-ish path of the CSS stylesheet being edited.
    pub fn css_path(&self) -> PathBuf {
        self.site_root().join(&self.site.css)
    }

    /// URL path of the edited document, used as the preview iframe source.
    pub fn page_url(&self) -> String {
        format!("/{}", self.site.html.to_string_lossy().replace('\\', "/"))
    }
}

#[cfg(test)]
pub(crate) fn test_parse_config(raw: &str) -> Config {
    toml::from_str(raw).expect("test config must parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.root, PathBuf::from("public"));
        assert_eq!(config.site.html, PathBuf::from("index.html"));
        assert_eq!(config.site.css, PathBuf::from("style.css"));
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_page_url() {
        let mut config = test_parse_config("[site]\nhtml = \"docs/start.html\"");
        config.base_dir = PathBuf::from(".");
        assert_eq!(config.page_url(), "/docs/start.html");
    }

    #[test]
    fn test_paths_join_base_dir() {
        let mut config = test_parse_config("[site]\nroot = \"www\"");
        config.base_dir = PathBuf::from("/project");
        assert_eq!(config.site_root(), PathBuf::from("/project/www"));
        assert_eq!(config.html_path(), PathBuf::from("/project/www/index.html"));
        assert_eq!(config.css_path(), PathBuf::from("/project/www/style.css"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = toml::from_str("[sites]\nroot = \"www\"");
        assert!(result.is_err());
    }
}
