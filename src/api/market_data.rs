//! Market data service: snapshot quotes and historical candles.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{
    Candle, CandleSeries, HistoryResult, Quote, QuoteResponse, Resolution, Symbol,
};
use crate::Result;

/// Service for market data operations.
///
/// Every call is one GET against the generation's data endpoint; ranges
/// and symbols are not pre-validated beyond non-emptiness, so a broker
/// rejection (malformed symbol, inverted date range) comes back as a
/// normal [`Error::Api`](crate::Error::Api) for the caller to display.
///
/// # Example
///
/// ```no_run
/// use fyers_rs::{Resolution, Symbol};
/// use chrono::NaiveDate;
///
/// # async fn example(client: fyers_rs::FyersClient) -> fyers_rs::Result<()> {
/// let symbol = Symbol::new("NSE:SBIN-EQ")?;
///
/// let quote = client.market_data().quote(&symbol).await?;
/// if let Some(q) = quote.quote {
///     println!("last={:?} change={:?}", q.last_price, q.change);
/// }
///
/// let from = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
/// let history = client
///     .market_data()
///     .history(&symbol, Resolution::Min15, from, to)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct MarketDataService {
    inner: Arc<ClientInner>,
}

impl MarketDataService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a snapshot quote for one symbol.
    ///
    /// The first element of the response's data array is extracted when
    /// present; an empty or absent array yields `quote: None` rather than
    /// an error, and the raw payload is always returned alongside.
    pub async fn quote(&self, symbol: &Symbol) -> Result<QuoteResponse> {
        let generation = self.inner.session.generation();
        let raw = self
            .inner
            .get(
                "quotes",
                generation.quotes_path(),
                &[("symbols", symbol.as_str().to_string())],
            )
            .await?;

        let quote = match raw
            .get("d")
            .and_then(|d| d.as_array())
            .and_then(|d| d.first())
            .and_then(|entry| entry.get("v"))
        {
            Some(node) => Some(Quote::from_value(node, generation)?),
            None => None,
        };

        Ok(QuoteResponse { quote, raw })
    }

    /// Get historical candles for a symbol over a calendar date range.
    ///
    /// `from` ≤ `to` is not enforced locally; an inverted range is the
    /// broker's rejection to report. A response without a `candles` array
    /// is the legitimate empty case, [`HistoryResult::NoData`].
    pub async fn history(
        &self,
        symbol: &Symbol,
        resolution: Resolution,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HistoryResult> {
        let generation = self.inner.session.generation();

        let mut query = vec![
            ("symbol", symbol.as_str().to_string()),
            ("resolution", resolution.as_str().to_string()),
            ("date_format", "1".to_string()),
            ("range_from", generation.format_range_date(from)),
            ("range_to", generation.format_range_date(to)),
        ];
        if generation.requires_cont_flag() {
            query.push(("cont_flag", "1".to_string()));
        }

        let raw = self
            .inner
            .get("history", generation.history_path(), &query)
            .await?;

        let Some(rows) = raw.get("candles").and_then(|c| c.as_array()) else {
            return Ok(HistoryResult::NoData(raw));
        };

        let candles = rows
            .iter()
            .map(Candle::from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(HistoryResult::Series(CandleSeries::new(
            symbol.clone(),
            resolution,
            candles,
        )))
    }
}
