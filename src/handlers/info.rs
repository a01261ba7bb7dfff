use std::time::Duration;

use worker::*;

use super::{failure_response, json_response, Failure, LookupParams};
use crate::config::provider_from_env;
use crate::resolver::{fallback::synthetic_detail, resolve_detail};
use crate::utils::trend::js_random;

const DEBUG_DELAY: Duration = Duration::from_secs(2);

/// `GET /api/get_info?query=<tag>&debugMode=<bool>`
pub async fn handle(req: Request, env: Env) -> Result<Response> {
    let url = req.url()?;
    let Some(params) = LookupParams::from_url(&url) else {
        console_log!("[info] missing query parameter");
        return failure_response(Failure::MissingQuery);
    };
    console_log!("[info] query={} debug={}", params.query, params.debug);

    if params.debug {
        Delay::from(DEBUG_DELAY).await;
        return json_response(&synthetic_detail(js_random), 200);
    }

    let outcome = match provider_from_env(&env) {
        Ok(provider) => resolve_detail(provider.as_ref(), &params.query).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(detail) => json_response(&detail, 200),
        Err(e) => {
            console_error!("[info] {}", e);
            failure_response(Failure::Internal(&e.to_string()))
        }
    }
}
