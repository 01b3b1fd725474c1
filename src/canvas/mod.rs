/// Canvas normalization module
///
/// This module turns arbitrary uploaded images into the canonical form the
/// generation API expects:
/// - Decoding PNG/JPEG/WEBP uploads
/// - Downscaling (never upscaling) onto a square, black, letterboxed canvas
/// - Lossless PNG encoding of the result
/// - Base64 transport encoding for API payloads

pub mod normalize;
pub mod transport;

pub use normalize::{normalize, CanonicalImage, MAX_DIMENSION};
