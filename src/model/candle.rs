use anyhow::{Context, Result};

use crate::okx::types::RawCandleRow;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub quote_volume: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Parse raw OKX candle rows `[ts, open, high, low, close, vol, volCcy]`.
    /// The feed returns newest first; output is oldest first. Malformed rows
    /// are dropped individually, the rest of the batch is kept.
    pub fn parse_rows(rows: &[RawCandleRow]) -> Vec<Candle> {
        let mut candles = Vec::with_capacity(rows.len());
        for row in rows.iter().rev() {
            match Self::parse_row(row) {
                Ok(candle) => candles.push(candle),
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping malformed candle row");
                }
            }
        }
        candles
    }

    fn parse_row(row: &[String]) -> Result<Candle> {
        fn field<'a>(row: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
            row.get(idx)
                .map(String::as_str)
                .with_context(|| format!("candle row missing {name} (index {idx})"))
        }

        let timestamp_ms: i64 = field(row, 0, "timestamp")?
            .parse()
            .context("candle timestamp is not an integer")?;
        let parse_f64 = |idx: usize, name: &str| -> Result<f64> {
            field(row, idx, name)?
                .parse::<f64>()
                .with_context(|| format!("candle {name} is not numeric"))
        };

        Ok(Candle {
            timestamp_ms,
            open: parse_f64(1, "open")?,
            high: parse_f64(2, "high")?,
            low: parse_f64(3, "low")?,
            close: parse_f64(4, "close")?,
            volume: parse_f64(5, "volume")?,
            quote_volume: parse_f64(6, "quote volume")?,
        })
    }
}
