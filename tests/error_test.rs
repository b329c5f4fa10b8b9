use std::io;
use std::path::PathBuf;

use sitebuild::error::Error;

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
    let err = Error::EnvFileNotFound { path: "/site/.env".to_string() };
    assert_eq!(
        err.to_string(),
        "Environment file '/site/.env' not found. Create it with KEY=VALUE lines."
    );

    let err = Error::SourceDoesNotExist { source_dir: "src".to_string() };
    assert_eq!(err.to_string(), "Source directory 'src' does not exist.");

    let err = Error::UnresolvedPlaceholders {
        files: vec![PathBuf::from("config.js"), PathBuf::from("ui/app.js")],
    };
    assert_eq!(err.to_string(), "Unresolved placeholders left in: 'config.js', 'ui/app.js'.");
}
