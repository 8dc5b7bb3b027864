//! Request dispatcher.
//!
//! Wraps a business [`ApiHandler`] into a transport handler:
//!
//! ```text
//! Start    derive RequestContext from the base context + fresh correlation id
//! Invoke   handler(ctx, request, writer) under the request deadline
//! Success  handler returned Ok and wrote a response → send it unchanged
//! Failed   handler returned Err (or timed out, or wrote nothing)
//!          → drop whatever was written, send 500 {"error": "<message>"}
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::context::{CorrelationIdGenerator, RequestContext};
use crate::http::error::ApiError;
use crate::http::request::ApiRequest;
use crate::http::response::{error_body, json_response, ResponseWriter};
use crate::observability::metrics;

/// Business handler invoked once per request.
///
/// On success the handler must have written exactly one response to `rsp`.
/// On failure it returns the error and leaves the error response to the
/// dispatcher.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    async fn handle(
        &self,
        ctx: &RequestContext,
        req: &ApiRequest,
        rsp: &mut ResponseWriter,
    ) -> Result<(), ApiError>;
}

pub struct Dispatcher<H> {
    handler: H,
    base: RequestContext,
    ids: Arc<dyn CorrelationIdGenerator>,
    timeout: Duration,
}

impl<H: ApiHandler> Dispatcher<H> {
    pub fn new(
        handler: H,
        base: RequestContext,
        ids: Arc<dyn CorrelationIdGenerator>,
        timeout: Duration,
    ) -> Self {
        Self {
            handler,
            base,
            ids,
            timeout,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Run one request through the handler and produce the transport response.
    pub async fn dispatch(&self, req: ApiRequest) -> Response {
        let start = Instant::now();
        let id = self.ids.next_id();
        let ctx = self
            .base
            .with_correlation_id(id)
            .with_path(req.path())
            .with_deadline(start + self.timeout);

        let mut rsp = ResponseWriter::new();
        let handled = self.handler.handle(&ctx, &req, &mut rsp);
        let outcome = tokio::time::timeout(self.timeout, handled)
            .await
            .unwrap_or(Err(ApiError::Timeout(self.timeout)));
        let written = outcome.and_then(|()| rsp.into_parts().ok_or(ApiError::NoResponse));

        let (status, body) = match written {
            Ok(written) => written,
            Err(err) => {
                tracing::error!(
                    request_id = %id,
                    method = %req.method(),
                    path = %req.path(),
                    error = %err,
                    "Request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err.to_string()))
            }
        };

        tracing::debug!(
            request_id = %id,
            status = status.as_u16(),
            took_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Request completed"
        );
        metrics::record_request(status.as_u16(), start);

        json_response(status, body, &id)
    }
}

/// Axum entry point: `State<Arc<Dispatcher<H>>>` → [`Dispatcher::dispatch`].
pub async fn serve_request<H: ApiHandler>(
    State(dispatcher): State<Arc<Dispatcher<H>>>,
    request: Request,
) -> Response {
    let (parts, _body) = request.into_parts();
    dispatcher.dispatch(ApiRequest::from_parts(parts)).await
}
