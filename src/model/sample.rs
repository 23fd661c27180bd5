use serde::Serialize;

use crate::model::tick::Tick;

/// Lifetime phase of a sliding window. The only allowed transition is
/// CollectingHistory -> Realtime; the window never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPhase {
    CollectingHistory,
    Realtime,
}

/// Projection of a tick taken at admission time, tagged with the phase the
/// window was in when it was recorded.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSample {
    pub timestamp: String,
    pub unix_time_ms: u64,
    pub trading_pair: String,
    pub last_price: Option<f64>,
    pub bid_price: Option<f64>,
    pub ask_price: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub spread: Option<f64>,
    pub data_type: WindowPhase,
}

impl WindowSample {
    pub fn from_tick(tick: &Tick, phase: WindowPhase) -> Self {
        let timestamp = chrono::DateTime::from_timestamp_millis(tick.unix_time_ms as i64)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        Self {
            timestamp,
            unix_time_ms: tick.unix_time_ms,
            trading_pair: tick.inst_id.clone(),
            last_price: tick.last,
            bid_price: tick.bid,
            ask_price: tick.ask,
            high_24h: tick.high_24h,
            low_24h: tick.low_24h,
            volume_24h: tick.vol_24h,
            spread: tick.spread(),
            data_type: phase,
        }
    }
}
