pub mod hashtagy;
pub mod hikerapi;
pub mod premium;

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::error::ResolveError;
use super::types::TagEntry;

use self::hashtagy::Hashtagy;
use self::hikerapi::HikerApi;
use self::premium::PremiumApi;

/// An outbound GET, described as plain data so it can be inspected in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

/// One third-party hashtag data source.
///
/// Implementations only describe requests and read bodies; the resolver
/// owns the HTTP calls and the quota/partial-failure policy.
pub trait HashtagProvider {
    /// Name used in logs and error messages.
    fn label(&self) -> &'static str;

    fn primary_request(&self, query: &str) -> Result<UpstreamRequest, ResolveError>;

    /// Second call for related tags, if the primary payload lacks them.
    fn related_request(&self, _query: &str) -> Result<Option<UpstreamRequest>, ResolveError> {
        Ok(None)
    }

    fn parse_primary(&self, query: &str, body: &Value) -> Result<Vec<TagEntry>, ResolveError>;

    fn parse_related(&self, body: &Value) -> Result<Vec<TagEntry>, ResolveError> {
        parse_tag_list(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Hashtagy,
    Premium,
    HikerApi,
}

impl ProviderKind {
    /// Secret (or var) holding this provider's API key.
    pub fn credential_name(self) -> &'static str {
        match self {
            ProviderKind::Hashtagy | ProviderKind::Premium => "RAPIDAPI_KEY",
            ProviderKind::HikerApi => "HIKERAPI_KEY",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Hashtagy => hashtagy::BASE_URL,
            ProviderKind::Premium => premium::BASE_URL,
            ProviderKind::HikerApi => hikerapi::BASE_URL,
        }
    }

    pub fn build(self, api_key: String, base_url: Url) -> Box<dyn HashtagProvider> {
        match self {
            ProviderKind::Hashtagy => Box::new(Hashtagy::new(api_key, base_url)),
            ProviderKind::Premium => Box::new(PremiumApi::new(api_key, base_url)),
            ProviderKind::HikerApi => Box::new(HikerApi::new(api_key, base_url)),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashtagy" => Ok(ProviderKind::Hashtagy),
            "premium" => Ok(ProviderKind::Premium),
            "hikerapi" => Ok(ProviderKind::HikerApi),
            other => Err(ResolveError::Configuration(format!(
                "Unknown HASHTAG_PROVIDER: {other}"
            ))),
        }
    }
}

/// Joins `path` onto the provider base and appends encoded query pairs.
pub(crate) fn endpoint(base: &Url, path: &str, params: &[(&str, &str)]) -> Result<String, ResolveError> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    Url::parse_with_params(&joined, params)
        .map(|u| u.to_string())
        .map_err(|e| ResolveError::Configuration(format!("bad upstream URL {joined}: {e}")))
}

/// Related-hashtag payloads come either bare or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagListBody {
    Bare(Vec<Value>),
    Nested {
        #[serde(default)]
        hashtags: Value,
    },
}

/// Reads a related-hashtags body: `[..]` or `{"hashtags": [..]}`.
///
/// A wrapper object without a usable `hashtags` array yields no entries;
/// anything that is neither an array nor an object is a shape error.
pub fn parse_tag_list(body: &Value) -> Result<Vec<TagEntry>, ResolveError> {
    let list = TagListBody::deserialize(body).map_err(|_| {
        ResolveError::InvalidResponseShape(format!("expected hashtag list, got {}", kind_of(body)))
    })?;

    Ok(match list {
        TagListBody::Bare(items) => parse_entries(&items),
        TagListBody::Nested { hashtags } => hashtags
            .as_array()
            .map(|items| parse_entries(items))
            .unwrap_or_default(),
    })
}

/// Maps raw tag objects to entries, dropping those with no usable text.
pub fn parse_entries(items: &[Value]) -> Vec<TagEntry> {
    items.iter().filter_map(parse_entry).collect()
}

fn parse_entry(item: &Value) -> Option<TagEntry> {
    let obj = item.as_object()?;
    // Search results sometimes nest the tag one level down.
    if let Some(inner) = obj.get("hashtag").filter(|v| v.is_object()) {
        return parse_entry(inner);
    }
    let name = ["name", "hashtag"]
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())?;
    let count = count_field(obj).map(read_count).unwrap_or(0);
    Some(TagEntry::new(name, count))
}

const COUNT_KEYS: [&str; 3] = ["media_count", "total_posts", "count"];

fn count_field(obj: &serde_json::Map<String, Value>) -> Option<&Value> {
    COUNT_KEYS.iter().find_map(|k| obj.get(*k))
}

/// Lenient post count: numbers or numeric strings, negatives clamp to 0.
pub fn read_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().replace(',', "").parse().unwrap_or(0),
        _ => 0,
    }
}

/// Hashtag-info payloads, flat or wrapped under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InfoBody {
    Wrapped { data: serde_json::Map<String, Value> },
    Flat(serde_json::Map<String, Value>),
}

/// Reads a single-hashtag info object into one entry.
///
/// If the upstream omits the tag text but reports a count, the queried tag
/// stands in for the name. An object with neither is a shape error.
pub fn parse_hashtag_info(query: &str, body: &Value) -> Result<TagEntry, ResolveError> {
    let info = match InfoBody::deserialize(body) {
        Ok(InfoBody::Wrapped { data }) | Ok(InfoBody::Flat(data)) => data,
        Err(_) => {
            return Err(ResolveError::InvalidResponseShape(format!(
                "expected hashtag object, got {}",
                kind_of(body)
            )))
        }
    };

    if let Some(entry) = parse_entry(&Value::Object(info.clone())) {
        return Ok(entry);
    }
    match count_field(&info) {
        Some(count) => Ok(TagEntry::new(query, read_count(count))),
        None => Err(ResolveError::InvalidResponseShape(
            "hashtag object has neither a name nor a post count".to_string(),
        )),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_list_is_read() {
        let body = json!([{"name": "cats", "media_count": 10}, {"name": "kitten"}]);
        let entries = parse_tag_list(&body).unwrap();
        assert_eq!(entries, vec![TagEntry::new("cats", 10), TagEntry::new("kitten", 0)]);
    }

    #[test]
    fn nested_list_is_read() {
        let body = json!({"hashtags": [{"hashtag": "dogs", "total_posts": "1,200"}]});
        assert_eq!(parse_tag_list(&body).unwrap(), vec![TagEntry::new("dogs", 1200)]);
    }

    #[test]
    fn search_result_with_inner_hashtag_object() {
        let body = json!({"hashtags": [{"position": 0, "hashtag": {"name": "pets", "media_count": 7}}]});
        assert_eq!(parse_tag_list(&body).unwrap(), vec![TagEntry::new("pets", 7)]);
    }

    #[test]
    fn empty_and_malformed_entries_are_dropped() {
        let body = json!([{"name": ""}, {"name": "  "}, "cats", null, {"other": 1}, {"hashtag": "ok"}]);
        assert_eq!(parse_tag_list(&body).unwrap(), vec![TagEntry::new("ok", 0)]);
    }

    #[test]
    fn wrapper_without_array_is_empty() {
        assert!(parse_tag_list(&json!({"status": "ok"})).unwrap().is_empty());
        assert!(parse_tag_list(&json!({"hashtags": "nope"})).unwrap().is_empty());
    }

    #[test]
    fn scalar_body_is_shape_error() {
        for body in [json!("text"), json!(42), json!(null)] {
            assert!(matches!(
                parse_tag_list(&body),
                Err(ResolveError::InvalidResponseShape(_))
            ));
        }
    }

    #[test]
    fn counts_are_lenient() {
        assert_eq!(read_count(&json!(5)), 5);
        assert_eq!(read_count(&json!(-5)), 0);
        assert_eq!(read_count(&json!(12.9)), 12);
        assert_eq!(read_count(&json!(" 42 ")), 42);
        assert_eq!(read_count(&json!("many")), 0);
        assert_eq!(read_count(&json!(null)), 0);
    }

    #[test]
    fn info_flat_and_wrapped() {
        let flat = json!({"name": "cats", "media_count": 99});
        let wrapped = json!({"data": {"name": "cats", "media_count": 99}});
        assert_eq!(parse_hashtag_info("cats", &flat).unwrap(), TagEntry::new("cats", 99));
        assert_eq!(parse_hashtag_info("cats", &wrapped).unwrap(), TagEntry::new("cats", 99));
    }

    #[test]
    fn info_without_name_uses_query() {
        let body = json!({"media_count": 3});
        assert_eq!(parse_hashtag_info("cats", &body).unwrap(), TagEntry::new("cats", 3));
    }

    #[test]
    fn info_without_name_or_count_is_shape_error() {
        let bodies = [
            json!({}),
            json!({"detail": "Hashtag not found", "status": "fail"}),
            json!({"data": {}}),
        ];
        for body in bodies {
            assert!(matches!(
                parse_hashtag_info("travel", &body),
                Err(ResolveError::InvalidResponseShape(_))
            ));
        }
    }

    #[test]
    fn info_array_is_shape_error() {
        assert!(matches!(
            parse_hashtag_info("cats", &json!([1, 2])),
            Err(ResolveError::InvalidResponseShape(_))
        ));
    }

    #[test]
    fn provider_kind_from_config() {
        assert_eq!("hashtagy".parse::<ProviderKind>().unwrap(), ProviderKind::Hashtagy);
        assert_eq!(" HikerAPI ".parse::<ProviderKind>().unwrap(), ProviderKind::HikerApi);
        assert!(matches!(
            "tiktok".parse::<ProviderKind>(),
            Err(ResolveError::Configuration(_))
        ));
    }

    #[test]
    fn credential_names() {
        assert_eq!(ProviderKind::Hashtagy.credential_name(), "RAPIDAPI_KEY");
        assert_eq!(ProviderKind::Premium.credential_name(), "RAPIDAPI_KEY");
        assert_eq!(ProviderKind::HikerApi.credential_name(), "HIKERAPI_KEY");
    }

    #[test]
    fn endpoint_encodes_params_and_keeps_base_path() {
        let base = Url::parse("https://mock.local/upstream/").unwrap();
        let url = endpoint(&base, "/v1/tags", &[("keyword", "a b#")]).unwrap();
        assert_eq!(url, "https://mock.local/upstream/v1/tags?keyword=a+b%23");
    }
}
