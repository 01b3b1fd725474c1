/// External API clients
///
/// Both collaborators are consumed over narrow REST contracts:
/// - images.rs - the image generation API (edit + generate)
/// - auth.rs - the identity provider (sign up + password sign-in)

pub mod auth;
pub mod images;
