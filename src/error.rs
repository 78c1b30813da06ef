//! Error types for the meet-results parsing library.
//!
//! Line-level parsing never produces errors: classifiers and grammars either
//! match and return a value or decline with `None`, and declined lines are
//! dropped. The error type below only covers the document-loading boundary
//! and invalid manual configuration.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or configuring a parse.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while reading an extracted-text document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed extracted-text document (JSON interchange format)
    #[error("Malformed document: {0}")]
    Document(#[from] serde_json::Error),

    /// Invalid parse configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}
