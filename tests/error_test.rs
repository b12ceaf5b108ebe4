use std::io;

use exgen::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::TargetExistsError { path: "shop/user".to_string() };
    assert_eq!(err.to_string(), "'shop/user' already exists, refusing to overwrite it.");

    let err = Error::SubprocessError {
        command: "npm install express".to_string(),
        reason: "exited with exit status: 1".to_string(),
    };
    assert_eq!(err.to_string(), "Command 'npm install express' failed: exited with exit status: 1.");

    let err = Error::MalformedDocumentError {
        document: "app.route.js".to_string(),
        reason: "document is empty".to_string(),
    };
    assert_eq!(err.to_string(), "Malformed document 'app.route.js': document is empty.");
}
