//! Error types for the code generator
//!
//! Collaborator failures (file system, XML, template engine) are kept as the
//! error source so the full chain reaches the command host unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the code generator
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A source path handed to the loader does not exist
    #[error("Source path not found: {}", .path.display())]
    SourcePath { path: PathBuf },

    /// Errors reading a metadata component file
    #[error("Metadata error in {}: {message}", .path.display())]
    Metadata {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Errors loading or rendering a template
    #[error("Template error: {message}")]
    Template {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Errors pretty-printing generated markup
    #[error("Format error: {message}")]
    Format {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system operation errors
    #[error("File system error: {operation} failed on {}", .path.display())]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CodegenError {
    /// Create a new missing source path error
    pub fn source_path<P: Into<PathBuf>>(path: P) -> Self {
        Self::SourcePath { path: path.into() }
    }

    /// Create a new metadata error
    pub fn metadata<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::Metadata {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    /// Create a new metadata error wrapping the underlying cause
    pub fn metadata_with_source<P, E>(message: impl Into<String>, path: P, source: E) -> Self
    where
        P: Into<PathBuf>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Metadata {
            message: message.into(),
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new template error
    pub fn template<E>(message: impl Into<String>, path: Option<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Template {
            message: message.into(),
            path,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new format error wrapping the underlying cause
    pub fn format_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Format {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CodegenError>;
