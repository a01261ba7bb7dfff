pub mod info;
pub mod preflight;
pub mod search;

use serde::Serialize;
use url::Url;
use worker::*;

use crate::utils::query::{get_query_param, is_flag_set, normalize_query};

pub const QUERY_REQUIRED: &str = "Query parameter is required";
pub const NOT_FOUND: &str = "Not found";

/// Sent on every response, preflight and errors included.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

#[derive(Debug, PartialEq, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Failures the caller sees as `{error: <message>}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure<'a> {
    MissingQuery,
    NotFound,
    Internal(&'a str),
}

impl<'a> Failure<'a> {
    fn status_and_body(self) -> (u16, ErrorBody<'a>) {
        match self {
            Failure::MissingQuery => (400, ErrorBody { error: QUERY_REQUIRED }),
            Failure::NotFound => (404, ErrorBody { error: NOT_FOUND }),
            Failure::Internal(message) => (500, ErrorBody { error: message }),
        }
    }
}

/// Parameters shared by `/api/search` and `/api/get_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupParams {
    pub query: String,
    pub debug: bool,
}

impl LookupParams {
    /// `None` when `query` is missing or holds nothing but `#`/whitespace.
    pub fn from_url(url: &Url) -> Option<Self> {
        let query = get_query_param(url, "query")?;
        if normalize_query(&query).is_empty() {
            return None;
        }
        Some(Self {
            query,
            debug: is_flag_set(url, "debugMode"),
        })
    }
}

/// Header pairs for a response, CORS first.
fn header_pairs(json: bool) -> Vec<(&'static str, &'static str)> {
    let mut pairs = CORS_HEADERS.to_vec();
    if json {
        pairs.push(JSON_CONTENT_TYPE);
    }
    pairs
}

fn to_headers(pairs: &[(&str, &str)]) -> Result<Headers> {
    let headers = Headers::new();
    for (name, value) in pairs {
        headers.set(name, value)?;
    }
    Ok(headers)
}

pub(crate) fn cors_headers() -> Result<Headers> {
    to_headers(&header_pairs(false))
}

pub(crate) fn json_response<T: Serialize>(data: &T, status: u16) -> Result<Response> {
    let body = serde_json::to_string(data)
        .map_err(|e| Error::RustError(format!("JSON serialization error: {e}")))?;

    let headers = to_headers(&header_pairs(true))?;
    Ok(Response::ok(body)?.with_headers(headers).with_status(status))
}

pub(crate) fn failure_response(failure: Failure) -> Result<Response> {
    let (status, body) = failure.status_and_body();
    json_response(&body, status)
}

pub fn not_found() -> Result<Response> {
    failure_response(Failure::NotFound)
}
