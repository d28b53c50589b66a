//! `[site]` section configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Locations of the site files being served and edited.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory served over HTTP (relative to the config file).
    pub root: PathBuf,

    /// HTML document being edited, relative to `root`.
    pub html: PathBuf,

    /// CSS stylesheet being edited, relative to `root`.
    pub css: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            html: PathBuf::from("index.html"),
            css: PathBuf::from("style.css"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_site_config_override() {
        let config = test_parse_config("[site]\nroot = \"dist\"\ncss = \"main.css\"");
        assert_eq!(config.site.root, PathBuf::from("dist"));
        // html keeps its default
        assert_eq!(config.site.html, PathBuf::from("index.html"));
        assert_eq!(config.site.css, PathBuf::from("main.css"));
    }
}
