use std::time::Duration;

use worker::*;

use super::{failure_response, json_response, Failure, LookupParams};
use crate::config::provider_from_env;
use crate::resolver::{fallback::demo_search, resolve};

/// Simulated upstream latency in debug mode.
const DEBUG_DELAY: Duration = Duration::from_secs(3);

/// `GET /api/search?query=<tag>&debugMode=<bool>`
pub async fn handle(req: Request, env: Env) -> Result<Response> {
    let url = req.url()?;
    let Some(params) = LookupParams::from_url(&url) else {
        console_log!("[search] missing query parameter");
        return failure_response(Failure::MissingQuery);
    };
    console_log!("[search] query={} debug={}", params.query, params.debug);

    if params.debug {
        Delay::from(DEBUG_DELAY).await;
        return json_response(&demo_search(), 200);
    }

    let outcome = match provider_from_env(&env) {
        Ok(provider) => resolve(provider.as_ref(), &params.query).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            console_log!(
                "[search] media_count={} related={} degraded={}",
                result.media_count,
                result.related_hashtags.len(),
                result.note.is_some() || result.error_related.is_some()
            );
            json_response(&result, 200)
        }
        Err(e) => {
            console_error!("[search] {}", e);
            failure_response(Failure::Internal(&e.to_string()))
        }
    }
}
