pub mod error;
pub mod fallback;
pub mod fetch;
pub mod providers;
pub mod types;

use worker::{console_error, console_log};

use crate::utils::query::normalize_query;
use crate::utils::trend::js_random;

use self::error::ResolveError;
use self::fallback::{is_quota_exhausted, quota_detail, quota_search, synthetic_detail};
use self::fetch::{send, UpstreamResponse};
use self::providers::{HashtagProvider, UpstreamRequest};
use self::types::{DetailResult, HashtagResult, TagEntry};

/// Where the search flow stands after the primary call.
#[derive(Debug, PartialEq)]
pub enum PrimaryOutcome {
    Done(HashtagResult),
    NeedsRelated {
        primary: Vec<TagEntry>,
        request: UpstreamRequest,
    },
}

/// Resolves a hashtag search: primary call, then related tags if needed.
///
/// Calls are strictly sequential. A 402/429 on the primary call yields
/// demo data; a failed related call keeps the primary count.
pub async fn resolve(provider: &dyn HashtagProvider, raw_query: &str) -> Result<HashtagResult, ResolveError> {
    let query = normalize_query(raw_query);
    console_log!("[resolver] provider={} query={}", provider.label(), query);

    let primary = send(&provider.primary_request(&query)?).await?;
    log_status(provider.label(), "primary", &primary);

    match interpret_primary(provider, &query, &primary)? {
        PrimaryOutcome::Done(result) => Ok(result),
        PrimaryOutcome::NeedsRelated { primary, request } => {
            let related = send(&request).await;
            if let Ok(resp) = &related {
                log_status(provider.label(), "related", resp);
            }
            let result = interpret_related(provider, &query, primary, related);
            if let Some(reason) = &result.error_related {
                console_error!("[resolver] related hashtags unavailable: {}", reason);
            }
            Ok(result)
        }
    }
}

/// Resolves trend details for a hashtag.
///
/// The upstream call validates the tag and the quota; the trend series
/// itself is synthesized because upstream trend numbers are not mapped yet.
pub async fn resolve_detail(provider: &dyn HashtagProvider, raw_query: &str) -> Result<DetailResult, ResolveError> {
    let query = normalize_query(raw_query);
    console_log!("[resolver] detail provider={} query={}", provider.label(), query);

    let resp = send(&provider.primary_request(&query)?).await?;
    log_status(provider.label(), "detail", &resp);

    interpret_detail(provider, &query, &resp, js_random)
}

fn log_status(label: &str, stage: &str, resp: &UpstreamResponse) {
    if resp.is_success() {
        console_log!("[resolver] {} {} status={}", label, stage, resp.status);
    } else {
        console_error!(
            "[resolver] {} {} status={} body={}",
            label,
            stage,
            resp.status,
            truncate(&resp.body, 300)
        );
    }
}

/// Applies the quota, status and shape rules to the primary answer.
pub fn interpret_primary(
    provider: &dyn HashtagProvider,
    query: &str,
    resp: &UpstreamResponse,
) -> Result<PrimaryOutcome, ResolveError> {
    if is_quota_exhausted(resp.status) {
        return Ok(PrimaryOutcome::Done(quota_search(resp.status)));
    }
    check_status(provider, resp)?;

    let body = parse_json(&resp.body)?;
    let entries = provider.parse_primary(query, &body)?;

    match provider.related_request(query)? {
        Some(request) => Ok(PrimaryOutcome::NeedsRelated {
            primary: entries,
            request,
        }),
        None => Ok(PrimaryOutcome::Done(build_result(query, &entries))),
    }
}

/// Combines the primary count with the related-tags answer.
///
/// The count always comes from the primary entries. Related tags exclude
/// both the query and the primary tag's own name, which upstreams may
/// spell differently from the query. Any failure here (transport, status, shape) degrades to the primary
/// count with no related tags and an `error_related` reason.
pub fn interpret_related(
    provider: &dyn HashtagProvider,
    query: &str,
    primary: Vec<TagEntry>,
    related: Result<UpstreamResponse, ResolveError>,
) -> HashtagResult {
    let media_count = media_count_for(query, &primary);
    let parsed = related.and_then(|resp| {
        check_status(provider, &resp)?;
        provider.parse_related(&parse_json(&resp.body)?)
    });

    match parsed {
        Ok(entries) => {
            let related = entries
                .into_iter()
                .filter(|e| !e.matches(query) && !primary.iter().any(|p| e.matches(&p.name)))
                .map(|e| e.name)
                .collect();
            HashtagResult::new(media_count, related)
        }
        Err(e) => HashtagResult {
            error_related: Some(e.to_string()),
            ..HashtagResult::new(media_count, Vec::new())
        },
    }
}

/// Builds the detail answer from the primary response.
pub fn interpret_detail(
    provider: &dyn HashtagProvider,
    query: &str,
    resp: &UpstreamResponse,
    sample: impl FnMut() -> f64,
) -> Result<DetailResult, ResolveError> {
    let quota = is_quota_exhausted(resp.status);
    if !quota {
        check_status(provider, resp)?;
        provider.parse_primary(query, &parse_json(&resp.body)?)?;
    }

    let detail = synthetic_detail(sample);
    Ok(if quota { quota_detail(detail) } else { detail })
}

/// Canonical result from a set of entries for `query`.
pub fn build_result(query: &str, entries: &[TagEntry]) -> HashtagResult {
    let related = entries
        .iter()
        .filter(|e| !e.matches(query))
        .map(|e| e.name.clone())
        .filter(|name| !name.is_empty())
        .collect();
    HashtagResult::new(media_count_for(query, entries), related)
}

/// Count of the entry matching `query`, else the first entry, else 0.
pub fn media_count_for(query: &str, entries: &[TagEntry]) -> u64 {
    entries
        .iter()
        .find(|e| e.matches(query))
        .or_else(|| entries.first())
        .map(|e| e.media_count)
        .unwrap_or(0)
}

fn check_status(provider: &dyn HashtagProvider, resp: &UpstreamResponse) -> Result<(), ResolveError> {
    if resp.is_success() {
        return Ok(());
    }
    Err(ResolveError::Upstream {
        provider: provider.label(),
        status: resp.status,
        body: resp.body.clone(),
    })
}

fn parse_json(body: &str) -> Result<serde_json::Value, ResolveError> {
    serde_json::from_str(body)
        .map_err(|e| ResolveError::InvalidResponseShape(format!("body is not JSON: {e}")))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
