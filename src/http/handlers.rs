//! Business handlers.

use std::borrow::Cow;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::fetcher::{PriceFetcher, PriceQuote};
use crate::http::dispatcher::ApiHandler;
use crate::http::error::ApiError;
use crate::http::request::ApiRequest;
use crate::http::response::{ResponseEnvelope, ResponseWriter};

/// Query parameter naming the symbol to quote.
pub const TICKER_PARAM: &str = "ticker";

/// `GET ?ticker=<symbol>` → `200 {"ticker", "price"}`.
///
/// Backend errors are returned to the dispatcher unwritten.
pub struct PriceHandler<F> {
    fetcher: F,
    normalize_symbols: bool,
}

impl<F: PriceFetcher> PriceHandler<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            normalize_symbols: false,
        }
    }

    /// Upper-case the ticker before the lookup and in the response.
    pub fn normalize_symbols(mut self, enabled: bool) -> Self {
        self.normalize_symbols = enabled;
        self
    }
}

#[async_trait]
impl<F: PriceFetcher + 'static> ApiHandler for PriceHandler<F> {
    async fn handle(
        &self,
        ctx: &RequestContext,
        req: &ApiRequest,
        rsp: &mut ResponseWriter,
    ) -> Result<(), ApiError> {
        let ticker = req
            .query_param(TICKER_PARAM)
            .ok_or(ApiError::MissingParameter(TICKER_PARAM))?;

        let symbol = if self.normalize_symbols {
            Cow::Owned(ticker.to_uppercase())
        } else {
            Cow::Borrowed(ticker)
        };

        let price = self.fetcher.fetch_price(ctx, &symbol).await?;
        let quote = PriceQuote::new(symbol.into_owned(), price)?;

        rsp.write_envelope(&ResponseEnvelope::Quote(quote))
    }
}
