//! Route registration for the aggregate router (`app.route.js`).
//!
//! The router text is parsed into three sections:
//!
//! ```text
//!  const express = require('express');                        ┐
//!  const router = express.Router();                           │ imports
//!  const exampleRoutes = require('./example/example.route');  ┘
//!  router.use('/example', exampleRoutes);                     ] mounts
//!  module.exports = router;                                   ] export
//! ```
//!
//! Registering a module appends one line to the end of the imports and one
//! line to the end of the mounts, then serializes everything back with a
//! single leading space per line.

use crate::constants::ROUTER_FILE;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Keyword that starts every import line.
pub const DECLARATION_KEYWORD: &str = "const ";

/// Keyword that starts the export statement.
pub const EXPORT_MARKER: &str = "module.exports";

/// Appended to a module name to form its route binding.
pub const ROUTE_BINDING_SUFFIX: &str = "Routes";

const INDENT: &str = " ";

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("valid line comment pattern"));

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*const\s+([\w$]+)\s*=").expect("valid declaration pattern")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w$]+").expect("valid identifier pattern"));

/// Outcome of [`register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The module was added; holds the full replacement text.
    Added(String),
    /// The module is already imported or mounted; the file must not change.
    AlreadyRegistered,
}

/// Structured form of the aggregate router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryDocument {
    imports: Vec<String>,
    mounts: Vec<String>,
    export: Vec<String>,
}

impl RegistryDocument {
    /// Splits router text into imports, mounts and export.
    ///
    /// Lines are stored trimmed; leading and trailing blank lines are dropped.
    ///
    /// # Errors
    /// * `Error::MalformedDocumentError` if the text is empty or has no
    ///   `module.exports` line
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(malformed("document is empty"));
        }

        let lines: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();

        let export_at = find_last_marker(&lines, EXPORT_MARKER)
            .ok_or_else(|| malformed(&format!("no line starts with `{EXPORT_MARKER}`")))?;
        let mounts_from = find_last_marker(&lines[..export_at], DECLARATION_KEYWORD)
            .map_or(0, |last_import| last_import + 1);

        Ok(Self {
            imports: lines[..mounts_from].to_vec(),
            mounts: lines[mounts_from..export_at].to_vec(),
            export: lines[export_at..].to_vec(),
        })
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn mounts(&self) -> &[String] {
        &self.mounts
    }

    pub fn export(&self) -> &[String] {
        &self.export
    }

    /// Whether `module_name` is already imported or mounted.
    ///
    /// Comments are ignored, including trailing `//` comments and multi-line
    /// `/* */` blocks, and the binding must match a whole identifier, so
    /// `superuserRoutes` or a comment mentioning `userRoutes` does not
    /// register `user`.
    pub fn is_registered(&self, module_name: &str) -> bool {
        let binding = route_binding(module_name);

        let imports = strip_comments(&self.imports);
        if DECLARATION.captures_iter(&imports).any(|captures| captures[1] == binding) {
            return true;
        }

        let mounts = strip_comments(&self.mounts);
        IDENTIFIER.find_iter(&mounts).any(|identifier| identifier.as_str() == binding)
    }

    /// Appends the import and mount lines for `module_name`.
    ///
    /// Returns `false` without touching the document if it is already registered.
    pub fn register(&mut self, module_name: &str) -> bool {
        if self.is_registered(module_name) {
            return false;
        }
        self.imports.push(import_line(module_name));
        self.mounts.push(mount_line(module_name));
        true
    }

    /// Serializes the sections back to normalized router text.
    pub fn to_text(&self) -> String {
        let lines = self.imports.iter().chain(&self.mounts).chain(&self.export);
        let mut text = String::new();
        for line in lines {
            text.push_str(&normalize_line(line));
            text.push('\n');
        }
        text
    }
}

/// Registers `module_name` in the router text `current_text`.
///
/// # Errors
/// * `Error::MalformedDocumentError` if `current_text` cannot be parsed
pub fn register(module_name: &str, current_text: &str) -> Result<Registration> {
    let mut document = RegistryDocument::parse(current_text)?;
    if document.register(module_name) {
        Ok(Registration::Added(document.to_text()))
    } else {
        Ok(Registration::AlreadyRegistered)
    }
}

/// Rewrites every non-blank line with exactly one leading space.
///
/// Blank lines become empty and leading/trailing blank lines are dropped.
/// Applying it twice yields the same text as applying it once.
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let mut normalized = String::with_capacity(text.len() + 16);
    for line in text.lines() {
        normalized.push_str(&normalize_line(line));
        normalized.push('\n');
    }
    normalized
}

/// `const {name}Routes = require('./{name}/{name}.route');`
pub fn import_line(module_name: &str) -> String {
    format!(
        "{DECLARATION_KEYWORD}{} = require('./{module_name}/{module_name}.route');",
        route_binding(module_name)
    )
}

/// `router.use('/{name}', {name}Routes);`
pub fn mount_line(module_name: &str) -> String {
    format!("router.use('/{module_name}', {});", route_binding(module_name))
}

pub fn route_binding(module_name: &str) -> String {
    format!("{module_name}{ROUTE_BINDING_SUFFIX}")
}

/// Index of the last line whose trimmed content starts with `marker`.
pub fn find_last_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Option<usize> {
    lines.iter().rposition(|line| line.as_ref().trim_start().starts_with(marker))
}

fn normalize_line(line: &str) -> String {
    let line = line.trim();
    if line.is_empty() {
        String::new()
    } else {
        format!("{INDENT}{line}")
    }
}

/// Joins `lines` and blanks out every `/* */` and `//` comment.
fn strip_comments(lines: &[String]) -> String {
    let text = lines.join("\n");
    let text = BLOCK_COMMENT.replace_all(&text, " ");
    LINE_COMMENT.replace_all(&text, "").into_owned()
}

fn malformed(reason: &str) -> Error {
    Error::MalformedDocumentError { document: ROUTER_FILE.to_string(), reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments() {
        let lines = [
            "router.use('/a', aRoutes); // bRoutes".to_string(),
            "/*".to_string(),
            "cRoutes".to_string(),
            "*/ router.use('/d', dRoutes);".to_string(),
        ];
        let stripped = strip_comments(&lines);

        assert!(stripped.contains("aRoutes"));
        assert!(stripped.contains("dRoutes"));
        assert!(!stripped.contains("bRoutes"));
        assert!(!stripped.contains("cRoutes"));
    }

    #[test]
    fn test_find_last_marker() {
        let lines = ["const a = 1;", "x();", "  const b = 2;", "module.exports = b;"];
        assert_eq!(find_last_marker(&lines, DECLARATION_KEYWORD), Some(2));
        assert_eq!(find_last_marker(&lines, EXPORT_MARKER), Some(3));
        assert_eq!(find_last_marker(&lines, "app.listen("), None);
    }

    #[test]
    fn test_parse_sections() {
        let document = RegistryDocument::parse(
            "const express = require('express');\n\
             const router = express.Router();\n\
             router.use('/a', aRoutes);\n\
             \n\
             module.exports = router;\n",
        )
        .unwrap();

        assert_eq!(document.imports().len(), 2);
        assert_eq!(document.mounts(), ["router.use('/a', aRoutes);", ""]);
        assert_eq!(document.export(), ["module.exports = router;"]);
    }

    #[test]
    fn test_declaration_after_export_is_not_an_import() {
        let document = RegistryDocument::parse(
            "const router = express.Router();\nmodule.exports = router;\nconst late = 1;\n",
        )
        .unwrap();

        assert_eq!(document.imports(), ["const router = express.Router();"]);
        assert_eq!(document.export(), ["module.exports = router;", "const late = 1;"]);
    }
}
