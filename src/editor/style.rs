//! CSS declaration updates.
//!
//! The rule is looked up by the first class name of the targeted element;
//! the declaration is updated in place or appended, and the rule itself is
//! created on demand when no selector matches.

use super::{EDITOR_ID_ATTR, EditorError};
use crate::dom;
use lightningcss::{
    properties::{Property, PropertyId},
    rules::CssRule,
    stylesheet::{ParserOptions, PrinterOptions, StyleSheet},
    traits::ToCss,
};
use std::fs;
use std::io;
use std::path::Path;

/// Set one declaration on the rule matching `.{class}`.
///
/// Returns the updated stylesheet text. When a rule matches, the whole sheet
/// is re-printed from the AST (the same whole-file rewrite the endpoint has
/// always done); when none matches, a new rule is appended to the original
/// text so existing formatting survives.
pub fn set_declaration<'a>(
    css: &'a str,
    class: &'a str,
    property: &'a str,
    value: &'a str,
) -> Result<String, EditorError> {
    // Validate the declaration up front; it is also the value spliced into
    // the AST when a rule matches.
    let new_prop = Property::parse_string(
        PropertyId::from(property),
        value,
        ParserOptions::default(),
    )
    .map_err(|e| EditorError::CssValue {
        property: property.to_string(),
        message: e.to_string(),
    })?;

    let mut sheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| EditorError::CssParse(e.to_string()))?;

    let selector = format!(".{class}");
    for rule in &mut sheet.rules.0 {
        let CssRule::Style(style) = rule else { continue };
        let selectors = style
            .selectors
            .to_css_string(PrinterOptions::default())
            .map_err(|e| EditorError::CssPrint(e.to_string()))?;
        if !selectors.split(',').any(|s| s.trim() == selector) {
            continue;
        }

        let target_id = new_prop.property_id();
        let decls = &mut style.declarations.declarations;
        match decls.iter_mut().find(|p| p.property_id() == target_id) {
            Some(existing) => *existing = new_prop,
            None => decls.push(new_prop),
        }

        let printed = sheet
            .to_css(PrinterOptions::default())
            .map_err(|e| EditorError::CssPrint(e.to_string()))?;
        return Ok(printed.code);
    }

    // No matching rule: create it on demand at the end of the stylesheet
    let mut out = css.trim_end().to_string();
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(&format!(".{class} {{\n  {property}: {value};\n}}\n"));
    Ok(out)
}

/// Update one CSS property for the element with the given editor id.
///
/// The element is resolved in the HTML file, its first class name selects
/// the rule, and the stylesheet is rewritten. A missing stylesheet file is
/// treated as empty and created. Returns the class name that was targeted.
pub fn update_class(
    html_path: &Path,
    css_path: &Path,
    id: &str,
    property: &str,
    value: &str,
) -> Result<String, EditorError> {
    let html = fs::read_to_string(html_path)?;
    let doc = dom::parse_document(&html);

    let node = doc
        .element_by_attr(EDITOR_ID_ATTR, id)
        .ok_or_else(|| EditorError::UnknownId(id.to_string()))?;
    let class = doc
        .element(node)
        .and_then(|el| el.attr("class"))
        .and_then(|c| c.split_whitespace().next())
        .ok_or_else(|| EditorError::MissingClass(id.to_string()))?
        .to_string();

    let css = match fs::read_to_string(css_path) {
        Ok(css) => css,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let updated = set_declaration(&css, &class, property, value)?;
    fs::write(css_path, updated)?;
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_existing_declaration() {
        let css = ".card {\n  width: 100px;\n  padding: 4px;\n}\n";
        let out = set_declaration(css, "card", "width", "200px").unwrap();
        assert!(out.contains("width: 200px"));
        assert!(!out.contains("100px"));
        assert!(out.contains("padding"));
    }

    #[test]
    fn test_append_missing_declaration() {
        let css = ".card {\n  width: 100px;\n}\n";
        let out = set_declaration(css, "card", "margin", "8px").unwrap();
        assert!(out.contains("width: 100px"));
        assert!(out.contains("margin: 8px"));
    }

    #[test]
    fn test_create_rule_on_demand() {
        let css = ".other {\n  color: red;\n}\n";
        let out = set_declaration(css, "card", "width", "50%").unwrap();
        // Original text is preserved verbatim on the miss path
        assert!(out.starts_with(".other {\n  color: red;\n}"));
        assert!(out.ends_with(".card {\n  width: 50%;\n}\n"));
    }

    #[test]
    fn test_create_rule_in_empty_sheet() {
        let out = set_declaration("", "hero", "text-align", "center").unwrap();
        assert_eq!(out, ".hero {\n  text-align: center;\n}\n");
    }

    #[test]
    fn test_matches_selector_in_list() {
        let css = ".a, .card {\n  width: 1px;\n}\n";
        let out = set_declaration(css, "card", "width", "2px").unwrap();
        assert!(out.contains("2px"));
        assert!(!out.contains("1px"));
    }

    #[test]
    fn test_descendant_selector_is_not_a_match() {
        // `.card p` mentions the class but does not select it
        let css = ".card p {\n  width: 1px;\n}\n";
        let out = set_declaration(css, "card", "width", "2px").unwrap();
        assert!(out.contains("width: 1px"));
        assert!(out.ends_with(".card {\n  width: 2px;\n}\n"));
    }

    #[test]
    fn test_invalid_value_rejected() {
        let err = set_declaration(".card { width: 1px; }", "card", "width", "}{").unwrap_err();
        assert!(matches!(err, EditorError::CssValue { .. }));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_update_class_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("index.html");
        let css_path = dir.path().join("style.css");
        fs::write(
            &html_path,
            "<body><div class=\"card shadow\" data-editor-id=\"el-1\">x</div></body>",
        )
        .unwrap();
        fs::write(&css_path, ".card {\n  color: red;\n}\n").unwrap();

        // First class name wins
        let class = update_class(&html_path, &css_path, "el-1", "width", "320px").unwrap();
        assert_eq!(class, "card");
        let css = fs::read_to_string(&css_path).unwrap();
        assert!(css.contains("width: 320px"));
    }

    #[test]
    fn test_update_class_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("index.html");
        let css_path = dir.path().join("style.css");
        fs::write(&html_path, "<body><div class=\"card\"></div></body>").unwrap();

        let err = update_class(&html_path, &css_path, "el-missing", "width", "1px").unwrap_err();
        assert!(matches!(err, EditorError::UnknownId(_)));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_update_class_no_class_attr() {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("index.html");
        let css_path = dir.path().join("style.css");
        fs::write(
            &html_path,
            "<body><div data-editor-id=\"el-1\">x</div></body>",
        )
        .unwrap();

        let err = update_class(&html_path, &css_path, "el-1", "width", "1px").unwrap_err();
        assert!(matches!(err, EditorError::MissingClass(_)));
    }

    #[test]
    fn test_update_class_creates_missing_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("index.html");
        let css_path = dir.path().join("style.css");
        fs::write(
            &html_path,
            "<body><div class=\"hero\" data-editor-id=\"el-1\">x</div></body>",
        )
        .unwrap();

        update_class(&html_path, &css_path, "el-1", "padding", "12px").unwrap();
        let css = fs::read_to_string(&css_path).unwrap();
        assert_eq!(css, ".hero {\n  padding: 12px;\n}\n");
    }
}
