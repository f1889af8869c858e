use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ExposerError {
    #[error("File {specifier} could not be read: {reason}")]
    #[diagnostic(code(exposer::unreadable_import))]
    UnreadableImport {
        specifier: String,
        path: PathBuf,
        reason: String,
    },

    #[error("File {} parse error: {message}", file.display())]
    #[diagnostic(code(exposer::parse_error))]
    ParseFailure { file: PathBuf, message: String },

    #[error("{function} has @expose annotation but it is not exported from {}", file.display())]
    #[diagnostic(
        code(exposer::exposed_not_exported),
        help("bind the function onto the module surface, e.g. `exports.name = name;`")
    )]
    ExposedNotExported { function: String, file: PathBuf },

    #[error("\"{}\" is missing from \"{specifier}\", did you forget to @expose ?", names.join(","))]
    #[diagnostic(code(exposer::missing_exposure))]
    MissingExposure {
        specifier: String,
        names: Vec<String>,
    },

    #[error("No source files found in {path}")]
    #[diagnostic(code(exposer::no_files))]
    NoFiles { path: PathBuf },

    #[error("{failed} of {total} files failed the expose check")]
    #[diagnostic(code(exposer::check_failed))]
    CheckFailed { failed: usize, total: usize },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(exposer::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(exposer::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(exposer::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(exposer::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, ExposerError>;
