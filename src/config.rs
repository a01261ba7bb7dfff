use url::Url;
use worker::Env;

use crate::resolver::error::ResolveError;
use crate::resolver::providers::{HashtagProvider, ProviderKind};

const DEFAULT_PROVIDER: &str = "hashtagy";

/// Builds the configured provider from the worker environment.
///
/// Read on every request: a missing key fails that request only.
pub fn provider_from_env(env: &Env) -> Result<Box<dyn HashtagProvider>, ResolveError> {
    let kind = env.var("HASHTAG_PROVIDER").ok().map(|v| v.to_string());
    let kind = parse_kind(kind.as_deref())?;

    let name = kind.credential_name();
    let credential = env
        .secret(name)
        .map(|s| s.to_string())
        .or_else(|_| env.var(name).map(|v| v.to_string()))
        .ok();
    let base_url = env.var("HASHTAG_API_BASE_URL").ok().map(|v| v.to_string());

    build_provider(kind, credential, base_url.as_deref())
}

fn parse_kind(raw: Option<&str>) -> Result<ProviderKind, ResolveError> {
    raw.filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_PROVIDER)
        .parse()
}

fn build_provider(
    kind: ProviderKind,
    credential: Option<String>,
    base_url: Option<&str>,
) -> Result<Box<dyn HashtagProvider>, ResolveError> {
    let name = kind.credential_name();
    let api_key = credential
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ResolveError::Configuration(format!("{name} is not set in environment variables")))?;

    let base = base_url
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(kind.default_base_url());
    let base = Url::parse(base.trim())
        .map_err(|e| ResolveError::Configuration(format!("HASHTAG_API_BASE_URL is invalid: {e}")))?;

    Ok(kind.build(api_key, base))
}
