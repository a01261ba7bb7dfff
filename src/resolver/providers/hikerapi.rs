use serde_json::Value;
use url::Url;

use super::{endpoint, parse_hashtag_info, HashtagProvider, UpstreamRequest};
use crate::resolver::error::ResolveError;
use crate::resolver::types::TagEntry;

pub const BASE_URL: &str = "https://api.hikerapi.com";

/// HikerAPI: key in `x-access-key`, same two-call flow as the premium API.
pub struct HikerApi {
    api_key: String,
    base_url: Url,
}

impl HikerApi {
    pub fn new(api_key: String, base_url: Url) -> Self {
        Self { api_key, base_url }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x-access-key", self.api_key.clone()),
            ("accept", "application/json".to_string()),
        ]
    }
}

impl HashtagProvider for HikerApi {
    fn label(&self) -> &'static str {
        "HikerAPI"
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
