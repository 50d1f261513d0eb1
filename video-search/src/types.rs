//! Common types for video search results
//!
//! These types are shared by every result source and by the controller, so
//! that results look the same no matter where they came from.

use serde::{Deserialize, Serialize};

/// A single video search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    /// The title of the video
    pub title: String,
    /// A description or snippet of the video
    pub description: String,
    /// URL of the thumbnail image
    pub thumbnail_url: String,
    /// Outbound link to watch the video
    pub target_url: String,
}

impl VideoResult {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        thumbnail_url: impl Into<String>,
        target_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            thumbnail_url: thumbnail_url.into(),
            target_url: target_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = VideoResult::new("t", "d", "thumb", "url");
        let b = VideoResult::new("t", "d", "thumb", "url");
        assert_eq!(a, b);
        assert_ne!(a, VideoResult::new("t", "d", "thumb", "other"));
    }

    #[test]
    fn test_serialization_field_names() {
        let result = VideoResult::new("Title", "Desc", "https://img", "https://watch");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["thumbnail_url"], "https://img");
        assert_eq!(json["target_url"], "https://watch");
    }
}
