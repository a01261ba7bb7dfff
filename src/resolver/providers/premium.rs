use serde_json::Value;
use url::Url;

use super::{endpoint, parse_hashtag_info, HashtagProvider, UpstreamRequest};
use crate::resolver::error::ResolveError;
use crate::resolver::types::TagEntry;

pub const BASE_URL: &str = "https://instagram-premium-api-2023.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "instagram-premium-api-2023.p.rapidapi.com";

/// Premium Instagram API on RapidAPI: hashtag info, then hashtag search.
pub struct PremiumApi {
    api_key: String,
    base_url: Url,
}

impl PremiumApi {
    pub fn new(api_key: String, base_url: Url) -> Self {
        Self { api_key, base_url }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x-rapidapi-key", self.api_key.clone()),
            ("x-rapidapi-host", RAPIDAPI_HOST.to_string()),
        ]
    }
}

impl HashtagProvider for PremiumApi {
    fn label(&self) -> &'static str {
        "Instagram Premium"
    }

    fn primary_request(&self, query: &str) -> Result<UpstreamRequest, ResolveError> {
        Ok(UpstreamRequest {
            url: endpoint(&self.base_url, "/v1/hashtag/by/name", &[("name", query)])?,
            headers: self.headers(),
        })
    }

    fn related_request(&self, query: &str) -> Result<Option<UpstreamRequest>, ResolveError> {
        Ok(Some(UpstreamRequest {
            url: endpoint(&self.base_url, "/v1/search/hashtags", &[("query", query)])?,
            headers: self.headers(),
        }))
    }

    fn parse_primary(&self, query: &str, body: &Value) -> Result<Vec<TagEntry>, ResolveError> {
        parse_hashtag_info(query, body).map(|entry| vec![entry])
    }
}
