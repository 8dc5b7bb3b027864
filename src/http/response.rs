//! Response envelope and the single-writer guard.
//!
//! # Responsibilities
//! - Define the two JSON shapes a caller can receive
//! - Tie each shape to exactly one status code
//! - Refuse a second write to the same response

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

use crate::context::CorrelationId;
use crate::fetcher::PriceQuote;
use crate::http::error::ApiError;
use crate::http::request::X_REQUEST_ID;

/// Written if encoding an error envelope itself fails.
const FALLBACK_ERROR_BODY: &[u8] = br#"{"error":"internal error"}"#;

/// Body of every response: a quote or an error, as one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Quote(PriceQuote),
    Error { error: String },
}

impl ResponseEnvelope {
    pub fn error(message: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            error: message.into(),
        }
    }

    /// 200 for a quote, 500 for an error.
    pub fn status(&self) -> StatusCode {
        match self {
            ResponseEnvelope::Quote(_) => StatusCode::OK,
            ResponseEnvelope::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PriceQuote> for ResponseEnvelope {
    fn from(quote: PriceQuote) -> Self {
        ResponseEnvelope::Quote(quote)
    }
}

/// Buffer a handler writes its response into. Holds at most one response.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    written: Option<(StatusCode, Vec<u8>)>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `value` as the response body.
    ///
    /// Fails with [`ApiError::Serialization`] if encoding fails and with
    /// [`ApiError::ResponseAlreadyWritten`] on a second call.
    pub fn write_json<T: Serialize + ?Sized>(
        &mut self,
        status: StatusCode,
        value: &T,
    ) -> Result<(), ApiError> {
        if self.written.is_some() {
            return Err(ApiError::ResponseAlreadyWritten);
        }
        let body = serde_json::to_vec(value)?;
        self.written = Some((status, body));
        Ok(())
    }

    pub fn write_envelope(&mut self, envelope: &ResponseEnvelope) -> Result<(), ApiError> {
        self.write_json(envelope.status(), envelope)
    }

    pub fn is_written(&self) -> bool {
        self.written.is_some()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.written.as_ref().map(|(status, _)| *status)
    }

    pub(crate) fn into_parts(self) -> Option<(StatusCode, Vec<u8>)> {
        self.written
    }
}

/// Encoded `{"error": message}`.
pub(crate) fn error_body(message: &str) -> Vec<u8> {
    serde_json::to_vec(&ResponseEnvelope::error(message))
        .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_vec())
}

/// Wrap an encoded body into the transport response.
pub(crate) fn json_response(status: StatusCode, body: Vec<u8>, id: &CorrelationId) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        headers.insert(X_REQUEST_ID, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to encode"))
        }
    }

    #[test]
    fn test_envelope_shapes() {
        let quote = ResponseEnvelope::from(PriceQuote::new("BTC", 100000.0).unwrap());
        assert_eq!(
            serde_json::to_string(&quote).unwrap(),
            r#"{"ticker":"BTC","price":100000}"#
        );
        assert_eq!(quote.status(), StatusCode::OK);

        let error = ResponseEnvelope::error("boom");
        assert_eq!(serde_json::to_string(&error).unwrap(), r#"{"error":"boom"}"#);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_second_write_is_rejected() {
        let mut writer = ResponseWriter::new();
        writer
            .write_envelope(&ResponseEnvelope::error("first"))
            .unwrap();

        let err = writer
            .write_json(StatusCode::OK, &serde_json::json!({"ticker": "BTC"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::ResponseAlreadyWritten));

        let (status, body) = writer.into_parts().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, br#"{"error":"first"}"#);
    }

    #[test]
    fn test_encode_failure_propagates_and_leaves_writer_empty() {
        let mut writer = ResponseWriter::new();
        let err = writer.write_json(StatusCode::OK, &Unencodable).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert!(!writer.is_written());
    }

    #[test]
    fn test_error_body_escapes_message() {
        assert_eq!(error_body("say \"hi\""), br#"{"error":"say \"hi\""}"#.to_vec());
    }

    #[test]
    fn test_json_response_headers() {
        let response = json_response(
            StatusCode::OK,
            b"{}".to_vec(),
            &CorrelationId::Sequential(12),
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(response.headers()[X_REQUEST_ID], "12");
    }
}
