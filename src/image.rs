//! Image URL selection rules
//!
//! Wikipedia thumbnails are sometimes vector icons or locator maps, which
//! render poorly as a photo. Commons search results are raster photos more
//! often, so they serve as the fallback.

/// Whether the URL points at a vector graphics file
pub fn is_vector_image(url: &str) -> bool {
    url.to_lowercase().ends_with(".svg")
}

/// Whether a Commons candidate is worth showing
///
/// Rejects empty URLs, vector files, and locator maps.
pub fn is_usable_candidate(url: &str) -> bool {
    !url.is_empty() && !is_vector_image(url) && !url.to_lowercase().contains("locator_map")
}

/// Picks the display image from a primary and a fallback URL
///
/// The primary wins unless it is empty or a vector file.
pub fn resolve_image(primary: &str, fallback: &str) -> String {
    if primary.is_empty() || is_vector_image(primary) {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}
