//! Name validation and the per-module data that feeds the templates.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid module name pattern"));

static PROJECT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid project name pattern")
});

/// Name-derived data used to generate one module's four files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Identifier used for the directory, file names and JS bindings
    pub name: String,
    /// `name` with its first character upper-cased, used for the model class
    pub capitalized_name: String,
}

impl ModuleDescriptor {
    /// Builds a descriptor from user input.
    ///
    /// # Errors
    /// * `Error::ValidationError` unless `name` is a plain identifier
    ///   (letters, digits and underscores, not starting with a digit)
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if !MODULE_NAME.is_match(&name) {
            return Err(Error::ValidationError(format!(
                "invalid module name '{name}': expected letters, digits and underscores, not starting with a digit"
            )));
        }
        let capitalized_name = capitalize(&name);
        Ok(Self { name, capitalized_name })
    }

    /// Template context shared by the model/controller/service/route templates.
    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "capitalized": self.capitalized_name,
        })
    }
}

/// Checks that a project name is a single, npm-compatible path segment.
pub fn validate_project_name(name: &str) -> Result<()> {
    if PROJECT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::ValidationError(format!(
            "invalid project name '{name}': expected letters, digits, '.', '_' or '-'"
        )))
    }
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
