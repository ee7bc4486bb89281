// crates/newsgeo-core/src/traits.rs
use crate::text::names_equal;

/// Name-based lookup for types that expose a canonical name.
///
/// Implementors provide a `&str` view of their canonical name via
/// [`NameMatch::name_str`] and get [`NameMatch::is_named`], a
/// whitespace-insensitive equality check.
///
/// # Examples
/// ```rust
/// use newsgeo_core::traits::NameMatch;
///
/// struct Region(&'static str);
/// impl NameMatch for Region {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Region("평안 남도").is_named("평안남도"));
/// assert!(!Region("평양시").is_named("평양"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Whitespace-insensitive equality.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        names_equal(self.name_str(), q)
    }
}
