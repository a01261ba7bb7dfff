use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{endpoint, kind_of, parse_entries, HashtagProvider, UpstreamRequest};
use crate::resolver::error::ResolveError;
use crate::resolver::types::TagEntry;

pub const BASE_URL: &str = "https://hashtagy-generate-hashtags.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "hashtagy-generate-hashtags.p.rapidapi.com";

/// Hashtagy on RapidAPI: one call returns the tag and its neighbours.
pub struct Hashtagy {
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    data: Data,
}

#[derive(Debug, Deserialize)]
struct Data {
    hashtags: Vec<Value>,
}

impl Hashtagy {
    pub fn new(api_key: String, base_url: Url) -> Self {
        Self { api_key, base_url }
    }
}

impl HashtagProvider for Hashtagy {
    fn label(&self) -> &'static str {
        "Hashtagy"
    }

    fn primary_request(&self, query: &str) -> Result<UpstreamRequest, ResolveError> {
        Ok(UpstreamRequest {
            url: endpoint(
                &self.base_url,
                "/v1/insta/tags",
                &[("keyword", query), ("include_tags_info", "true")],
            )?,
            headers: vec![
                ("x-rapidapi-key", self.api_key.clone()),
                ("x-rapidapi-host", RAPIDAPI_HOST.to_string()),
            ],
        })
    }

    fn parse_primary(&self, _query: &str, body: &Value) -> Result<Vec<TagEntry>, ResolveError> {
        let envelope = Envelope::deserialize(body).map_err(|e| {
            ResolveError::InvalidResponseShape(format!("Hashtagy {}: {e}", kind_of(body)))
        })?;
        if envelope.status != "ok" {
            return Err(ResolveError::InvalidResponseShape(format!(
                "Hashtagy status {}",
                envelope.status
            )));
        }
        Ok(parse_entries(&envelope.data.hashtags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> Hashtagy {
        Hashtagy::new("key-123".into(), Url::parse(BASE_URL).unwrap())
    }

    #[test]
    fn builds_single_request() {
        let p = provider();
        let req = p.primary_request("cats").unwrap();
        assert_eq!(
            req.url,
            "https://hashtagy-generate-hashtags.p.rapidapi.com/v1/insta/tags?keyword=cats&include_tags_info=true"
        );
        assert!(req.headers.contains(&("x-rapidapi-key", "key-123".to_string())));
        assert!(req
            .headers
            .contains(&("x-rapidapi-host", RAPIDAPI_HOST.to_string())));
        assert!(p.related_request("cats").unwrap().is_none());
    }

    #[test]
    fn reads_combined_payload() {
        let body = json!({
            "status": "ok",
            "data": {"hashtags": [
                {"hashtag": "cats", "total_posts": 500},
                {"hashtag": "catlover", "total_posts": 20}
            ]}
        });
        let entries = provider().parse_primary("cats", &body).unwrap();
        assert_eq!(entries, vec![TagEntry::new("cats", 500), TagEntry::new("catlover", 20)]);
    }

    #[test]
    fn rejects_non_ok_status() {
        let body = json!({"status": "error", "data": {"hashtags": []}});
        assert!(matches!(
            provider().parse_primary("cats", &body),
            Err(ResolveError::InvalidResponseShape(_))
        ));
    }

    #[test]
    fn rejects_missing_hashtags_array() {
        for body in [json!({"status": "ok"}), json!({"status": "ok", "data": {"hashtags": {}}}), json!([])] {
            assert!(matches!(
                provider().parse_primary("cats", &body),
                Err(ResolveError::InvalidResponseShape(_))
            ));
        }
    }
}
