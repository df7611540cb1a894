//! Error definitions
//!
//! Categorized by source: filesystem / format / codec / shape / config

use std::path::Path;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum SensorError {
    // ===== Input Errors =====
    /// Path does not exist
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// Wrong file extension for the parser
    #[error("expected {} file but got extension '{found}'", extension_list(.expected))]
    Format {
        expected: Vec<String>,
        found: String,
    },

    /// Image codec could not parse the file contents
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Buffer dimensions do not match the expected layout
    #[error("shape error: {message}")]
    Shape { message: String },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SensorError {
    /// Create not-found error for a path
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.display().to_string(),
        }
    }

    /// Create format error for a single accepted extension
    pub fn format(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Format {
            expected: vec![expected.into()],
            found: found.into(),
        }
    }

    /// Create format error when any of several extensions is accepted
    pub fn format_any(expected: &[&str], found: impl Into<String>) -> Self {
        Self::Format {
            expected: expected.iter().map(|e| e.to_string()).collect(),
            found: found.into(),
        }
    }

    /// Create decode error wrapping the codec's error
    pub fn decode(
        path: &Path,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            path: path.display().to_string(),
            source: Box::new(source),
        }
    }

    /// Create shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// "`.bin`", "`.bin` or `.ply`", "`.a`, `.b` or `.c`"
fn extension_list(extensions: &[String]) -> String {
    let quoted: Vec<String> = extensions.iter().map(|e| format!("`.{e}`")).collect();
    match quoted.split_last() {
        None => "a supported".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SensorError>;

/// Check the file extension, then existence.
///
/// Extension is compared case-sensitively, the way the recorder writes it.
pub fn ensure_input_file(path: &Path, expected_ext: &str) -> Result<()> {
    let found = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if found != expected_ext {
        return Err(SensorError::format(expected_ext, found));
    }
    if !path.is_file() {
        return Err(SensorError::not_found(path));
    }
    Ok(())
}
