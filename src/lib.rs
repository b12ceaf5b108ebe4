//! exgen scaffolds Express + Sequelize projects.
//! It creates the project skeleton, adds model/controller/service/route
//! modules and registers them in the aggregate router, and wires up
//! swagger documentation.

/// Command-line interface module for the exgen application
pub mod cli;

/// Configuration handling (exgen.json, exgen.yml, exgen.yaml)
pub mod config;

/// File names, suffixes and globs of the generated layout
pub mod constants;

/// Project and module name validation
pub mod descriptor;

/// Model/route scanning and swagger wiring for `docs-generate`
pub mod docs;

/// Error types and handling for the exgen application
pub mod error;

/// The `init`, `module-new` and `docs-generate` commands
pub mod generator;

/// Directories skipped while scanning a project
pub mod ignore;

/// Package manager subprocess invocation
pub mod installer;

pub mod logger;

/// Directory and file creation beneath an explicit root
pub mod materializer;

/// Route registration in `app.route.js`
pub mod registry;

/// Template rendering engine
pub mod renderer;

/// Text of every generated artifact
pub mod templates;
