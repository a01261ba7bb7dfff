use worker::*;

use super::error::ResolveError;
use super::providers::UpstreamRequest;

/// Status and raw body of an upstream answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a GET upstream and reads the whole body as text.
///
/// Non-2xx statuses are returned, not raised; only transport failures
/// (DNS, TLS, unreadable body) become errors here.
pub async fn send(upstream: &UpstreamRequest) -> std::result::Result<UpstreamResponse, ResolveError> {
    let headers = Headers::new();
    for (name, value) in &upstream.headers {
        headers.set(name, value)?;
    }

    let mut init = RequestInit::new();
    init.with_method(Method::Get).with_headers(headers);

    let request = Request::new_with_init(&upstream.url, &init)?;
    let mut resp = Fetch::Request(request).send().await?;

    let status = resp.status_code();
    let body = resp.text().await?;
    console_log!("[fetch] status={} len={} url={}", status, body.len(), redact(&upstream.url));

    Ok(UpstreamResponse { status, body })
}

/// Drops the query string so tags typed by users stay out of the logs.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = |status| UpstreamResponse { status, body: String::new() }.is_success();
        assert!(ok(200));
        assert!(ok(204));
        assert!(!ok(302));
        assert!(!ok(429));
    }

    #[test]
    fn redact_strips_query() {
        assert_eq!(redact("https://a.dev/v1/tags?keyword=cats"), "https://a.dev/v1/tags");
        assert_eq!(redact("https://a.dev/v1"), "https://a.dev/v1");
    }
}
