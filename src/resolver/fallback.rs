use super::types::{DetailResult, HashtagResult};
use crate::utils::trend::{synthetic_trend, synthetic_trending};

/// Media count reported by demo data.
pub const DEMO_MEDIA_COUNT: u64 = 12345;
const DEMO_TAG_COUNT: usize = 20;

pub const QUOTA_NOTE: &str = "API quota reached. Showing demo data instead.";

/// 402 Payment Required and 429 Too Many Requests mean the plan ran dry.
pub fn is_quota_exhausted(status: u16) -> bool {
    matches!(status, 402 | 429)
}

/// `example1` through `example20`.
pub fn demo_hashtags() -> Vec<String> {
    (1..=DEMO_TAG_COUNT).map(|i| format!("example{i}")).collect()
}

/// Synthetic search payload, also served by debug mode.
pub fn demo_search() -> HashtagResult {
    HashtagResult::new(DEMO_MEDIA_COUNT, demo_hashtags())
}

/// Synthetic detail payload; the trend series is placeholder data.
pub fn synthetic_detail(mut sample: impl FnMut() -> f64) -> DetailResult {
    DetailResult {
        is_trending: synthetic_trending(&mut sample),
        trend_data: synthetic_trend(&mut sample),
        note: None,
    }
}

/// Search payload served in place of a quota-exhausted upstream answer.
pub fn quota_search(status: u16) -> HashtagResult {
    HashtagResult {
        note: Some(QUOTA_NOTE.to_string()),
        api_error: Some(format!("Upstream responded with {status}")),
        ..demo_search()
    }
}

/// Detail payload served in place of a quota-exhausted upstream answer.
pub fn quota_detail(mut detail: DetailResult) -> DetailResult {
    detail.note = Some(QUOTA_NOTE.to_string());
    detail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_statuses() {
        assert!(is_quota_exhausted(402));
        assert!(is_quota_exhausted(429));
        assert!(!is_quota_exhausted(403));
        assert!(!is_quota_exhausted(500));
    }

    #[test]
    fn demo_tags_run_from_one_to_twenty() {
        let tags = demo_hashtags();
        assert_eq!(tags.len(), 20);
        assert_eq!(tags.first().map(String::as_str), Some("example1"));
        assert_eq!(tags.last().map(String::as_str), Some("example20"));
    }

    #[test]
    fn quota_result_is_demo_data_with_note() {
        let result = quota_search(429);
        assert_eq!(result.media_count, 12345);
        assert_eq!(result.related_hashtags, demo_hashtags());
        assert!(result.note.as_deref().is_some_and(|n| !n.is_empty()));
        assert_eq!(result.api_error.as_deref(), Some("Upstream responded with 429"));
        assert!(result.error_related.is_none());
    }

    #[test]
    fn quota_detail_keeps_series() {
        let detail = quota_detail(synthetic_detail(|| 0.5));
        assert!(detail.is_trending);
        assert_eq!(detail.trend_data, [50; 7]);
        assert_eq!(detail.note.as_deref(), Some(QUOTA_NOTE));
    }

    #[test]
    fn debug_search_has_no_annotations() {
        let result = demo_search();
        assert!(result.note.is_none());
        assert!(result.api_error.is_none());
    }
}
