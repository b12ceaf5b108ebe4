//! API documentation support for `docs-generate`.
//!
//! Scans the first-level module directories for models and routes, builds the
//! swagger-jsdoc options and mounts swagger-ui-express in `app.js`.

use crate::config::Config;
use crate::constants::{MODEL_GLOB, MODEL_SUFFIX, ROUTE_GLOB, SERVER_FILE};
use crate::descriptor::capitalize;
use crate::error::{Error, Result};
use crate::registry::find_last_marker;
use globset::{GlobBuilder, GlobMatcher, GlobSet};
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// The docs block is inserted right before the last line starting with this.
pub const STARTUP_MARKER: &str = "app.listen(";

/// Binding introduced by the docs block; its presence means `app.js` is already patched.
pub const DOCS_BINDING: &str = "swaggerUi";

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*:\s*\{([^{}]*)\}").expect("valid attribute pattern"));

static DATA_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type\s*:\s*DataTypes\.(\w+)").expect("valid type pattern"));

static NOT_NULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"allowNull\s*:\s*false").expect("valid allowNull pattern"));

/// One attribute of a `sequelize.define` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAttribute {
    pub name: String,
    /// Sequelize `DataTypes` member, e.g. `STRING`
    pub data_type: String,
    /// `allowNull: false`
    pub required: bool,
}

impl ModelAttribute {
    /// OpenAPI property schema for this attribute.
    pub fn property_schema(&self) -> serde_json::Value {
        let (openapi_type, format) = match self.data_type.as_str() {
            "INTEGER" | "BIGINT" | "SMALLINT" | "MEDIUMINT" | "TINYINT" => ("integer", None),
            "FLOAT" | "DOUBLE" | "REAL" | "DECIMAL" => ("number", None),
            "BOOLEAN" => ("boolean", None),
            "DATE" => ("string", Some("date-time")),
            "DATEONLY" => ("string", Some("date")),
            "UUID" | "UUIDV1" | "UUIDV4" => ("string", Some("uuid")),
            "JSON" | "JSONB" => ("object", None),
            _ => ("string", None),
        };
        match format {
            Some(format) => serde_json::json!({ "type": openapi_type, "format": format }),
            None => serde_json::json!({ "type": openapi_type }),
        }
    }
}

/// Models and routes found in a project, in directory order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProjectScan {
    /// Model name (file name without `.model.js`) to its attributes
    pub models: IndexMap<String, Vec<ModelAttribute>>,
    /// Route files relative to the project root
    pub routes: Vec<PathBuf>,
}

impl ProjectScan {
    /// OpenAPI `components.schemas` built from the scanned models.
    pub fn schemas(&self) -> serde_json::Map<String, serde_json::Value> {
        self.models
            .iter()
            .map(|(name, attributes)| {
                let properties: serde_json::Map<_, _> = attributes
                    .iter()
                    .map(|attribute| (attribute.name.clone(), attribute.property_schema()))
                    .collect();
                let required: Vec<&str> = attributes
                    .iter()
                    .filter(|attribute| attribute.required)
                    .map(|attribute| attribute.name.as_str())
                    .collect();

                let mut schema = serde_json::json!({ "type": "object", "properties": properties });
                if !required.is_empty() {
                    schema["required"] = serde_json::json!(required);
                }
                (capitalize(name), schema)
            })
            .collect()
    }
}

fn matcher(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::ScanError(format!("invalid pattern '{pattern}': {e}")))
}

/// Looks one directory level deep for `*.model.js` and `*.route.js` files.
///
/// # Arguments
/// * `root` - Project root
/// * `ignore` - Paths (relative to `root`) that are never descended into
pub fn scan_project(root: &Path, ignore: &GlobSet) -> Result<ProjectScan> {
    let models = matcher(MODEL_GLOB)?;
    let routes = matcher(ROUTE_GLOB)?;
    let relative = |path: &Path| path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let mut scan = ProjectScan::default();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !ignore.is_match(relative(entry.path())));

    for entry in walker {
        let entry = entry.map_err(|e| Error::ScanError(e.to_string()))?;
        if entry.depth() != 2 || !entry.file_type().is_file() {
            continue;
        }
        let path = relative(entry.path());

        if models.is_match(&path) {
            let name = entry
                .file_name()
                .to_string_lossy()
                .trim_end_matches(MODEL_SUFFIX)
                .to_string();
            let source = std::fs::read_to_string(entry.path())?;
            let attributes = parse_model_attributes(&source);
            debug!("Found model '{}' with {} attribute(s)", name, attributes.len());
            scan.models.insert(name, attributes);
        } else if routes.is_match(&path) {
            debug!("Found route file '{}'", path.display());
            scan.routes.push(path);
        }
    }

    Ok(scan)
}

/// Extracts `name: { type: DataTypes.X, ... }` attributes from a model source.
pub fn parse_model_attributes(source: &str) -> Vec<ModelAttribute> {
    ATTRIBUTE
        .captures_iter(source)
        .filter_map(|captures| {
            let body = captures.get(2)?.as_str();
            let data_type = DATA_TYPE.captures(body)?.get(1)?.as_str().to_string();
            Some(ModelAttribute {
                name: captures.get(1)?.as_str().to_string(),
                data_type,
                required: NOT_NULL.is_match(body),
            })
        })
        .collect()
}

/// swagger-jsdoc options: the OpenAPI definition plus the route file glob.
pub fn docs_options(config: &Config, scan: &ProjectScan) -> serde_json::Value {
    serde_json::json!({
        "definition": {
            "openapi": "3.0.0",
            "info": {
                "title": config.docs.title,
                "version": config.docs.version,
            },
            "servers": [{ "url": config.server.api_prefix }],
            "components": { "schemas": scan.schemas() },
        },
        "apis": [format!("./{ROUTE_GLOB}")],
    })
}

/// The lines that mount the documentation UI.
pub fn docs_block(docs_path: &str) -> [String; 3] {
    [
        format!("const {DOCS_BINDING} = require('swagger-ui-express');"),
        "const swaggerSpec = require('./swagger');".to_string(),
        format!("app.use('{docs_path}', {DOCS_BINDING}.serve, {DOCS_BINDING}.setup(swaggerSpec));"),
    ]
}

/// Inserts the docs block before the server's startup call.
///
/// Returns `None` when the block is already present.
///
/// # Errors
/// * `Error::MalformedDocumentError` if no line starts with `app.listen(`
pub fn mount_docs(server_source: &str, docs_path: &str) -> Result<Option<String>> {
    let declaration = format!("const {DOCS_BINDING} ");
    if server_source.lines().any(|line| line.trim_start().starts_with(&declaration)) {
        return Ok(None);
    }

    let lines: Vec<&str> = server_source.lines().collect();
    let startup_at = find_last_marker(&lines, STARTUP_MARKER).ok_or_else(|| {
        Error::MalformedDocumentError {
            document: SERVER_FILE.to_string(),
            reason: format!("no line starts with `{STARTUP_MARKER}`"),
        }
    })?;
    let startup = lines[startup_at];
    let indent = &startup[..startup.len() - startup.trim_start().len()];

    let mut patched: Vec<String> = lines[..startup_at].iter().map(|line| line.to_string()).collect();
    patched.extend(docs_block(docs_path).iter().map(|line| format!("{indent}{line}")));
    patched.push(String::new());
    patched.extend(lines[startup_at..].iter().map(|line| line.to_string()));

    let mut text = patched.join("\n");
    if server_source.ends_with('\n') {
        text.push('\n');
    }
    Ok(Some(text))
}
