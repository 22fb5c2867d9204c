/// Shown for records without a stored image
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// Strip one leading `uploads/` or `uploads\` segment left by older uploads.
pub fn clean_image_path(path: &str) -> &str {
    path.strip_prefix("uploads/")
        .or_else(|| path.strip_prefix("uploads\\"))
        .unwrap_or(path)
}

/// Composes public asset URLs as `<apiBase><uploadsPath>/<cleanedImagePath>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    api_base: String,
    uploads_path: String,
}

impl AssetResolver {
    pub fn new(api_base: impl Into<String>, uploads_path: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        let uploads_path = uploads_path.into();
        let uploads_path = if uploads_path.is_empty() || uploads_path.starts_with('/') {
            uploads_path
        } else {
            format!("/{}", uploads_path)
        };
        Self {
            api_base,
            uploads_path: uploads_path.trim_end_matches('/').to_string(),
        }
    }

    /// URL for a stored image, or the placeholder when there is none.
    pub fn image_url(&self, image: Option<&str>) -> String {
        self.preview_url(image)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
    }

    /// URL for a stored image, `None` when there is nothing to preview.
    pub fn preview_url(&self, image: Option<&str>) -> Option<String> {
        let image = image.filter(|s| !s.trim().is_empty())?;
        Some(format!(
            "{}{}/{}",
            self.api_base,
            self.uploads_path,
            clean_image_path(image)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AssetResolver {
        AssetResolver::new("http://localhost:3000/api", "/uploads")
    }

    #[test]
    fn test_strips_legacy_prefix() {
        assert_eq!(clean_image_path("uploads/a.png"), "a.png");
        assert_eq!(clean_image_path("uploads\\a.png"), "a.png");
        assert_eq!(clean_image_path("a.png"), "a.png");
        // only the leading segment goes
        assert_eq!(clean_image_path("uploads/uploads/a.png"), "uploads/a.png");
        assert_eq!(clean_image_path("img/uploads/a.png"), "img/uploads/a.png");
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            resolver().image_url(Some("uploads/cover.jpg")),
            "http://localhost:3000/api/uploads/cover.jpg"
        );
        assert_eq!(resolver().image_url(None), PLACEHOLDER_IMAGE_URL);
        assert_eq!(resolver().image_url(Some("")), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_normalizes_slashes() {
        let r = AssetResolver::new("https://api.example.com/", "files/");
        assert_eq!(
            r.preview_url(Some("x.png")).as_deref(),
            Some("https://api.example.com/files/x.png")
        );
    }
}
