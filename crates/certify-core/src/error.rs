//! Core error types

use thiserror::Error;

/// Errors raised by a certificate store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this identifier already exists
    #[error("certificate {0} already exists")]
    Conflict(String),

    /// Transport or backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Required field missing or malformed input
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Malformed certificate identifier
    #[error("invalid certificate id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every identifier drawn collided with an existing record
    #[error("no free certificate id after {attempts} attempts")]
    IdentifierExhausted { attempts: u32 },

    /// Rasterization or PDF assembly failure
    #[error("export error: {0}")]
    Export(String),
}

impl From<lopdf::Error> for Error {
    fn from(e: lopdf::Error) -> Self {
        Error::Export(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::Export(format!("qr encoding failed: {e}"))
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
