/// UI widget helpers
///
/// Larger view fragments that main.rs composes into screens:
/// - gallery.rs - the wrapped thumbnail grid of library entries

pub mod gallery;
