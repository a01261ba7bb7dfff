use serde::Serialize;

use crate::utils::trend::TREND_POINTS;

/// Canonical answer for `/api/search`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HashtagResult {
    pub media_count: u64,
    pub related_hashtags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_related: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_error: Option<String>,
}

impl HashtagResult {
    pub fn new(media_count: u64, related_hashtags: Vec<String>) -> Self {
        Self {
            media_count,
            related_hashtags,
            note: None,
            error_related: None,
            api_error: None,
        }
    }
}

/// Answer for `/api/get_info`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetailResult {
    pub is_trending: bool,
    pub trend_data: [u32; TREND_POINTS],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One hashtag as reported by an upstream, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub name: String,
    pub media_count: u64,
}

impl TagEntry {
    pub fn new(name: impl Into<String>, media_count: u64) -> Self {
        Self {
            name: name.into(),
            media_count,
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }
}
