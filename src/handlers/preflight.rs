use worker::*;

use super::cors_headers;

/// CORS preflight: empty 200 carrying only the CORS headers.
pub fn handle() -> Result<Response> {
    Ok(Response::empty()?.with_headers(cors_headers()?))
}
