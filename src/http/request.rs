//! Inbound request view handed to business handlers.

use axum::http::{request::Parts, HeaderMap, Method, Uri};

/// Response header carrying the correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Transport-independent view of a request: method, path, headers, decoded query.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        let query = uri.query().map(decode_query).unwrap_or_default();
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            query,
        }
    }

    pub fn from_parts(parts: Parts) -> Self {
        let mut request = Self::new(parts.method, parts.uri);
        request.headers = parts.headers;
        request
    }

    /// First value of `name`, percent-decoded. `Some("")` for `?name=`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn decode_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(uri: &'static str) -> ApiRequest {
        ApiRequest::new(Method::GET, Uri::from_static(uri))
    }

    #[test]
    fn test_query_param_lookup() {
        let req = get("/prices?ticker=BTC&ticker=ETH&x=1");
        assert_eq!(req.query_param("ticker"), Some("BTC"));
        assert_eq!(req.query_param("x"), Some("1"));
        assert_eq!(req.query_param("missing"), None);
        assert_eq!(req.path(), "/prices");
    }

    #[test]
    fn test_empty_and_encoded_values() {
        assert_eq!(get("/?ticker=").query_param("ticker"), Some(""));
        assert_eq!(get("/?ticker=BT%43").query_param("ticker"), Some("BTC"));
        assert_eq!(get("/?ticker=a+b").query_param("ticker"), Some("a b"));
    }

    #[test]
    fn test_no_query_string() {
        let req = get("/");
        assert_eq!(req.query_param("ticker"), None);
        assert_eq!(*req.method(), Method::GET);
    }
}
