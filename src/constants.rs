//! Common constants used throughout exgen.

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["exgen.json", "exgen.yml", "exgen.yaml"];

/// Server entry point written by `init`
pub const SERVER_FILE: &str = "app.js";

/// Aggregate router that `module-new` registers routes in
pub const ROUTER_FILE: &str = "app.route.js";

/// Promise wrapper shared by every generated route
pub const ERROR_HANDLER_FILE: &str = "error-handler.js";

pub const CONFIG_DIR: &str = "config";

pub const DATABASE_FILE: &str = "database.js";

/// swagger-jsdoc options written by `docs-generate`
pub const DOCS_FILE: &str = "swagger.js";

/// Module generated alongside every new project
pub const EXAMPLE_MODULE: &str = "example";

pub const MODEL_SUFFIX: &str = ".model.js";
pub const CONTROLLER_SUFFIX: &str = ".controller.js";
pub const SERVICE_SUFFIX: &str = ".service.js";
pub const ROUTE_SUFFIX: &str = ".route.js";

/// Glob over module route files, relative to the project root
pub const ROUTE_GLOB: &str = "*/*.route.js";

/// Glob over module model files, relative to the project root
pub const MODEL_GLOB: &str = "*/*.model.js";
