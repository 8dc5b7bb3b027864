use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Successful quote body returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    pub ticker: String,
    pub price: f64,
}

/// Error body returned with any non-200 status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status code: {status}, error: {message}")]
    Status { status: StatusCode, message: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct PriceClient {
    client: Client,
    endpoint: String,
}

impl PriceClient {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Use a preconfigured `reqwest::Client` (pool settings, proxies, timeouts).
    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Fetch the current price for `ticker`.
    ///
    /// Any non-200 status is decoded from the service's `{"error": ...}`
    /// envelope into [`ClientError::Status`].
    pub async fn fetch_price(&self, ticker: &str) -> Result<PriceResponse, ClientError> {
        let url = Url::parse_with_params(&self.endpoint, &[("ticker", ticker)])?;
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status != StatusCode::OK {
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body.error,
                Err(_) => text,
            };
            return Err(ClientError::Status { status, message });
        }

        Ok(serde_json::from_str::<PriceResponse>(&text)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
