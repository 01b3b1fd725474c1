/// Error types for the application
///
/// Every fallible operation maps to one of these kinds, and each action
/// boundary in the UI reports the kind with its own message. Variants carry
/// owned strings instead of source errors so they stay `Clone` and can ride
/// inside iced messages.

use thiserror::Error;

/// Errors from the canvas normalizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// The uploaded bytes are not a decodable PNG/JPEG/WEBP image.
    #[error("could not decode image: {0}")]
    Decode(String),

    /// The requested canvas dimension is not a positive integer.
    /// Programmer error - never produced by user input.
    #[error("invalid canvas dimension: {0}")]
    InvalidDimension(u32),

    /// PNG encoding of the finished canvas failed.
    #[error("could not encode canvas as PNG: {0}")]
    Encode(String),
}

/// Errors from the folder-backed library store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    /// The library directory cannot be created or is not writable.
    #[error("library unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    /// Writing an entry failed (disk full, permissions, ...).
    #[error("could not write {filename}: {reason}")]
    Write { filename: String, reason: String },

    /// Reading an entry back failed.
    #[error("could not read {filename}: {reason}")]
    Read { filename: String, reason: String },

    /// The target entry does not exist. Recoverable - shown as a warning.
    #[error("{filename} is not in the library")]
    NotFound { filename: String },
}

/// Errors from the image generation API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// The upstream API rejected the request; message surfaced verbatim.
    #[error("{0}")]
    Upstream(String),

    /// The request never completed (connection, DNS, TLS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response arrived but was not in the documented shape.
    #[error("unexpected API response: {0}")]
    Malformed(String),
}

/// Errors from the identity provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The provider rejected the credentials; message surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response arrived but was not in the documented shape.
    #[error("unexpected auth response: {0}")]
    Malformed(String),
}

/// Umbrella error for action pipelines that cross subsystems
/// (normalize -> generate -> store).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
