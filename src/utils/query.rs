use url::Url;

/// Strips one leading `#` and surrounding whitespace from a hashtag query.
///
/// Whitespace before the `#` is tolerated, so `"  #cats "` becomes `"cats"`.
pub fn normalize_query(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim().to_string()
}

/// Extracts a single query parameter value from a URL.
pub fn get_query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Returns `true` only if the parameter is literally `"true"`.
pub fn is_flag_set(url: &Url, key: &str) -> bool {
    url.query_pairs().any(|(k, v)| k == key && v == "true")
}
