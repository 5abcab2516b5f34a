//! Error types for contract validation

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Failures that abort a validation run.
///
/// Instance violations are not errors; they are collected as
/// [`Diagnostics`](crate::Diagnostics). Everything here means the schema
/// document (or the input around it) cannot be used at all.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("unsupported $ref target: {reference}")]
    UnsupportedReferenceKind { reference: String },

    #[error("$ref path '{reference}' segment '{segment}' missing from schema")]
    BrokenReference { reference: String, segment: String },

    #[error("$ref '{reference}' does not resolve to an object")]
    InvalidReferenceTarget { reference: String },

    #[error("cyclic $ref chain: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    #[error("Invalid schema descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// True when the schema document itself is malformed, as opposed to an
    /// input that could not be read or parsed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedReferenceKind { .. }
                | Self::BrokenReference { .. }
                | Self::InvalidReferenceTarget { .. }
                | Self::CyclicReference { .. }
        )
    }
}
