//! HTTP middleware for the OMDb client.

use crate::utils::fmt_duration;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Requests slower than this are logged at `warn`.
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(2);

/// Logs every outgoing request with its status and latency.
///
/// The query string is left out of the log because it carries the API key.
pub struct TransparentMiddleware;

#[async_trait::async_trait]
impl Middleware for TransparentMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let path = req.url().path().to_owned();
        trace!(method = %method, path = %path, "sending request");

        let start = Instant::now();
        let result = next.run(req, extensions).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) if elapsed > SLOW_REQUEST_THRESHOLD => warn!(
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                duration = fmt_duration(elapsed),
                "slow request"
            ),
            Ok(response) => debug!(
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                duration = fmt_duration(elapsed),
                "request completed"
            ),
            Err(e) => warn!(
                method = %method,
                path = %path,
                duration = fmt_duration(elapsed),
                kind = failure_kind(e),
                "request failed"
            ),
        }

        result
    }
}

/// Short classification of a failed request. The error's own `Display`
/// embeds the full URL, API key included, so it is kept out of logs.
fn failure_kind(err: &reqwest_middleware::Error) -> &'static str {
    match err {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => "timeout",
        reqwest_middleware::Error::Reqwest(e) if e.is_connect() => "connect",
        reqwest_middleware::Error::Reqwest(e) if e.is_body() || e.is_decode() => "body",
        reqwest_middleware::Error::Reqwest(_) => "transport",
        reqwest_middleware::Error::Middleware(_) => "middleware",
    }
}
