//! Image asset reference resolution.
//!
//! Image fields on documents hold a reference of the form
//! `image-{assetId}-{width}x{height}-{format}`; the public CDN URL is
//! derived from it. Resolution is a pure string transform; resolved URLs
//! are not cached beyond the render they were built for.

/// Resolve an image asset reference to its public CDN URL.
///
/// Returns `None` if the reference does not have the expected shape.
///
/// # Example
///
/// ```rust,ignore
/// let url = image_url("9x7k2p4q", "production", "image-a1b2c3-2000x1500-jpg");
/// assert_eq!(
///     url.as_deref(),
///     Some("https://cdn.sanity.io/images/9x7k2p4q/production/a1b2c3-2000x1500.jpg")
/// );
/// ```
#[must_use]
pub fn image_url(project_id: &str, dataset: &str, asset_ref: &str) -> Option<String> {
    let rest = asset_ref.strip_prefix("image-")?;
    let (base, format) = rest.rsplit_once('-')?;

    if base.is_empty() || format.is_empty() {
        return None;
    }

    Some(format!(
        "https://cdn.sanity.io/images/{project_id}/{dataset}/{base}.{format}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_well_formed_reference() {
        let url = image_url("9x7k2p4q", "production", "image-a1b2c3d4-2000x1500-jpg");
        assert_eq!(
            url.as_deref(),
            Some("https://cdn.sanity.io/images/9x7k2p4q/production/a1b2c3d4-2000x1500.jpg")
        );
    }

    #[test]
    fn test_resolves_webp_reference() {
        let url = image_url("9x7k2p4q", "staging", "image-ff00aa-800x600-webp");
        assert_eq!(
            url.as_deref(),
            Some("https://cdn.sanity.io/images/9x7k2p4q/staging/ff00aa-800x600.webp")
        );
    }

    #[test]
    fn test_rejects_non_image_reference() {
        assert!(image_url("p", "d", "file-a1b2c3-pdf").is_none());
        assert!(image_url("p", "d", "").is_none());
    }

    #[test]
    fn test_rejects_reference_without_format() {
        assert!(image_url("p", "d", "image-a1b2c3").is_none());
        assert!(image_url("p", "d", "image-").is_none());
    }
}
