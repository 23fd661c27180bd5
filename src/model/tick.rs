use crate::okx::types::{opt_f64, RawTicker};

/// Normalized real-time price update. Numeric fields are None when the feed
/// reported the "N/A" sentinel; downstream price math skips those ticks.
#[derive(Debug, Clone)]
pub struct Tick {
    pub inst_id: String,
    pub unix_time_ms: u64,
    pub last: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub vol_24h: Option<f64>,
}

impl Tick {
    pub fn from_raw(raw: &RawTicker, unix_time_ms: u64) -> Self {
        Self {
            inst_id: raw.inst_id.clone(),
            unix_time_ms,
            last: opt_f64(&raw.last),
            bid: opt_f64(&raw.bid_px),
            ask: opt_f64(&raw.ask_px),
            high_24h: opt_f64(&raw.high_24h),
            low_24h: opt_f64(&raw.low_24h),
            vol_24h: opt_f64(&raw.vol_24h),
        }
    }

    /// Ask minus bid; None when either side is unavailable.
    pub fn spread(&self) -> Option<f64> {
        Some(self.ask? - self.bid?)
    }

    /// Create a synthetic tick with only a last price (for tests and warm-up).
    pub fn from_price(inst_id: &str, price: f64, unix_time_ms: u64) -> Self {
        Self {
            inst_id: inst_id.to_string(),
            unix_time_ms,
            last: Some(price),
            bid: None,
            ask: None,
            high_24h: None,
            low_24h: None,
            vol_24h: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(last: &str, bid: &str, ask: &str) -> RawTicker {
        RawTicker {
            inst_id: "BTC-USDT".to_string(),
            last: last.to_string(),
            bid_px: bid.to_string(),
            ask_px: ask.to_string(),
            high_24h: "92000".to_string(),
            low_24h: "90000".to_string(),
            vol_24h: "1234.5".to_string(),
        }
    }

    #[test]
    fn from_raw_parses_all_fields() {
        let tick = Tick::from_raw(&raw("91000.5", "91000.4", "91000.6"), 1_700_000_000_000);
        assert_eq!(tick.last, Some(91000.5));
        assert_eq!(tick.high_24h, Some(92000.0));
        let spread = tick.spread().unwrap();
        assert!((spread - 0.2).abs() < 1e-9);
    }

    #[test]
    fn sentinel_fields_become_none() {
        let tick = Tick::from_raw(&raw("N/A", "91000.4", "N/A"), 0);
        assert_eq!(tick.last, None);
        assert_eq!(tick.bid, Some(91000.4));
        assert_eq!(tick.spread(), None);
    }
}
