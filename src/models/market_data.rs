//! Market data models: snapshot quotes and historical candles.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;

use super::primitives::{ApiGeneration, Resolution, Symbol};
use crate::Result;

/// A snapshot quote for one symbol.
///
/// The broker's field names differ between API generations (v2 reports
/// change-percent as `chp`, v3 as `ch_per` and adds `volume`); this struct
/// is the generation-neutral view extracted from the raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Last traded price.
    pub last_price: Option<Decimal>,
    /// Absolute change from the previous close.
    pub change: Option<Decimal>,
    /// Percent change from the previous close.
    pub change_percent: Option<Decimal>,
    /// Day volume. Only populated by the v3 API.
    pub volume: Option<i64>,
}

/// Raw field layout of a quote node, across both generations.
#[derive(Debug, Deserialize)]
struct QuoteFields {
    #[serde(default)]
    lp: Option<Decimal>,
    #[serde(default)]
    ch: Option<Decimal>,
    #[serde(default)]
    chp: Option<Decimal>,
    #[serde(default)]
    ch_per: Option<Decimal>,
    #[serde(default)]
    volume: Option<i64>,
}

impl Quote {
    /// Extract a quote from the `v` node of a quotes response element,
    /// reading the field names the given generation uses.
    pub(crate) fn from_value(node: &Value, generation: ApiGeneration) -> Result<Self> {
        let fields: QuoteFields = serde_json::from_value(node.clone())?;
        let change_percent = match generation {
            ApiGeneration::V2 => fields.chp,
            ApiGeneration::V3 => fields.ch_per,
        };
        Ok(Quote {
            last_price: fields.lp,
            change: fields.ch,
            change_percent,
            volume: fields.volume,
        })
    }
}

/// Response from a quote request.
///
/// The extracted [`Quote`] is `None` when the broker returned a
/// well-formed response whose data array was empty or absent; the raw
/// payload always rides along for display and diagnostics.
#[derive(Debug, Clone)]
pub struct QuoteResponse {
    /// The first quote in the response's data array, if any.
    pub quote: Option<Quote>,
    /// The unmodified response body.
    pub raw: Value,
}

/// Timestamp of one candle row.
///
/// The v2 history API reports epoch seconds; the v3 API reports a
/// calendar date. A single series is always homogeneous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleStamp {
    /// Unix epoch seconds (v2).
    Epoch(i64),
    /// Calendar date (v3).
    Date(NaiveDate),
}

impl CandleStamp {
    /// The stamp as a UTC datetime, where one can be derived.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CandleStamp::Epoch(secs) => Utc.timestamp_opt(*secs, 0).single(),
            CandleStamp::Date(date) => date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive)),
        }
    }
}

impl PartialOrd for CandleStamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (CandleStamp::Epoch(a), CandleStamp::Epoch(b)) => a.partial_cmp(b),
            (CandleStamp::Date(a), CandleStamp::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// One OHLCV record for a fixed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Interval timestamp.
    pub stamp: CandleStamp,
    /// Opening price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: i64,
}

/// Wire shape of the first element of a candle row, per generation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStamp {
    Epoch(i64),
    Date(String),
}

impl Candle {
    /// Reshape one broker candle row `[stamp, open, high, low, close, volume]`.
    pub(crate) fn from_row(row: &Value) -> Result<Self> {
        use serde::de::Error as _;

        let (stamp, open, high, low, close, volume): (
            RawStamp,
            Decimal,
            Decimal,
            Decimal,
            Decimal,
            i64,
        ) = serde_json::from_value(row.clone())?;

        let stamp = match stamp {
            RawStamp::Epoch(secs) => CandleStamp::Epoch(secs),
            RawStamp::Date(text) => {
                let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|e| {
                    serde_json::Error::custom(format!("bad candle date {text:?}: {e}"))
                })?;
                CandleStamp::Date(date)
            }
        };

        Ok(Candle {
            stamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// A chronological series of candles for one symbol and resolution.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    /// Symbol the series was requested for.
    pub symbol: Symbol,
    /// Candle interval.
    pub resolution: Resolution,
    /// Candles in ascending time order.
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub(crate) fn new(symbol: Symbol, resolution: Resolution, mut candles: Vec<Candle>) -> Self {
        // Brokers return rows in order; sort defends against gaps in that
        // contract. Mixed stamp kinds never occur within one response.
        candles.sort_by(|a, b| a.stamp.partial_cmp(&b.stamp).unwrap_or(Ordering::Equal));
        Self {
            symbol,
            resolution,
            candles,
        }
    }

    /// Number of candles in the series.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Whether the series contains no candles.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Closing prices in time order, ready for charting.
    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

/// Outcome of a historical candles request.
///
/// An absent `candles` array is a legitimate empty result (unsubscribed
/// symbol, non-trading date range), distinct from a request error.
#[derive(Debug, Clone)]
pub enum HistoryResult {
    /// The broker returned candle rows.
    Series(CandleSeries),
    /// A well-formed response with no candle data; the raw body is kept
    /// so the caller can show the broker's own explanation.
    NoData(Value),
}

impl HistoryResult {
    /// The series, if the broker returned data.
    pub fn series(&self) -> Option<&CandleSeries> {
        match self {
            HistoryResult::Series(series) => Some(series),
            HistoryResult::NoData(_) => None,
        }
    }

    /// Whether this is the empty-result case.
    pub fn is_no_data(&self) -> bool {
        matches!(self, HistoryResult::NoData(_))
    }
}
