//! Shared building blocks for every generator.
//!
//! - [`types`]: property-kind lookup tables (type expressions, example values)
//! - [`typescript`]: identifier casing and literal formatting

pub mod types;
pub mod typescript;

/// Concatenates fragments in the order given.
///
/// Every composer ends with one call to this function over an explicit list,
/// so the order of sections is visible in a single place. Empty fragments
/// (toggled-off sections) contribute nothing.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::assemble;
///
/// let artifact = assemble([
///     "// header\n".to_string(),
///     String::new(),
///     "export {};\n".to_string(),
/// ]);
/// assert_eq!(artifact, "// header\nexport {};\n");
/// ```
#[must_use]
pub fn assemble<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments.into_iter().collect()
}

/// Returns `text` when `enabled`, an empty string otherwise.
#[must_use]
pub fn gated(enabled: bool, text: impl FnOnce() -> String) -> String {
    if enabled { text() } else { String::new() }
}
