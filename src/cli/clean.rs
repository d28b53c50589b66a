//! `forma clean` - strip editor ids from the HTML source.

use crate::config::Config;
use crate::editor;
use crate::log;
use anyhow::{Context, Result};

pub fn run(config: &Config) -> Result<()> {
    let html_path = config.html_path();
    let removed = editor::clean::strip_editor_ids(&html_path)
        .with_context(|| format!("failed to clean {}", html_path.display()))?;

    if removed > 0 {
        log!("edit"; "removed {} editor id(s) from {}", removed, html_path.display());
    } else {
        log!("edit"; "{} is already clean", html_path.display());
    }
    Ok(())
}
