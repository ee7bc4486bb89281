// crates/newsgeo-core/src/text.rs

//! Name normalization shared by every matching rule in the crate.
//!
//! Administrative names in the article corpus are free text: the same region
//! shows up as `평안남도`, `평안 남도` or just `평양`. All comparisons go
//! through [`normalize_name`] first.

/// Strips every whitespace character (leading, trailing and internal).
///
/// ```rust
/// use newsgeo_core::text::normalize_name;
///
/// assert_eq!(normalize_name("  평안 남도 "), "평안남도");
/// assert_eq!(normalize_name("\t"), "");
/// ```
pub fn normalize_name(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Symmetric containment on normalized names.
///
/// Returns `true` if either normalized string contains the other. Empty names
/// never match anything, otherwise a blank location token would count toward
/// every region.
///
/// ```rust
/// use newsgeo_core::text::names_overlap;
///
/// assert!(names_overlap("평양시", "평양"));
/// assert!(names_overlap("평양", "평양시"));
/// assert!(names_overlap("평안남도", "평안 남도"));
/// assert!(!names_overlap("개성", "평양"));
/// ```
pub fn names_overlap(a: &str, b: &str) -> bool {
    normalized_overlap(&normalize_name(a), &normalize_name(b))
}

/// Same as [`names_overlap`] for inputs that are already normalized.
#[inline]
pub fn normalized_overlap(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Strict equality on normalized names (used at place level).
///
/// ```rust
/// use newsgeo_core::text::names_equal;
///
/// assert!(names_equal("대동 강", "대동강"));
/// assert!(!names_equal("평양시", "평양"));
/// ```
pub fn names_equal(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    !a.is_empty() && a == normalize_name(b)
}
