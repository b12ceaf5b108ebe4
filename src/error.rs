//! Error handling for exgen.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Errors that can occur while scaffolding a project.
///
/// Every failure is fatal for the invocation except a failed docs package
/// install, which `generate_docs` logs and skips.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the MiniJinja engine while rendering a template
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during configuration loading or parsing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents an invalid project or module name
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The directory that should be created already exists.
    #[error("'{path}' already exists, refusing to overwrite it.")]
    TargetExistsError { path: String },

    /// A file the command depends on is missing from the project root.
    #[error("'{path}' was not found. Run this command from the root of a generated project.")]
    ProjectNotFoundError { path: String },

    /// The package manager could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}.")]
    SubprocessError { command: String, reason: String },

    /// A generated file no longer has the marker line an edit relies on.
    #[error("Malformed document '{document}': {reason}.")]
    MalformedDocumentError { document: String, reason: String },

    /// Represents errors while walking the project tree or compiling glob patterns
    #[error("Scan error: {0}.")]
    ScanError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to report
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
