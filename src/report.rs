use serde::Serialize;

use crate::config::IndicatorConfig;
use crate::indicator::{self, atr::atr, ema::ema, macd::macd, rsi::rsi};
use crate::model::candle::Candle;

// Below this many candles the reports are flagged as best-effort.
const MIN_CANDLES: usize = 30;

/// Intraday indicator battery over one candle batch (oldest -> newest).
/// Series fields are trimmed to the trailing `series_len` points; when no
/// point was computable they are backfilled from the current scalar.
#[derive(Debug, Clone, Serialize)]
pub struct IntradayReport {
    pub current_price: f64,
    pub ema: f64,
    pub macd: f64,
    pub rsi_fast: f64,
    pub rsi_slow: f64,
    pub mid_prices: Vec<f64>,
    pub ema_series: Vec<f64>,
    pub macd_series: Vec<f64>,
    pub rsi_fast_series: Vec<f64>,
    pub rsi_slow_series: Vec<f64>,
}

/// Longer-term context: EMA pair, ATR pair, volume, and trailing series.
#[derive(Debug, Clone, Serialize)]
pub struct LongTermReport {
    pub ema: f64,
    pub ema_long: f64,
    pub atr_short: f64,
    pub atr: f64,
    pub current_volume: f64,
    pub avg_volume: f64,
    pub macd_series: Vec<f64>,
    pub rsi_slow_series: Vec<f64>,
}

fn finish_series(series: Vec<f64>, fallback: f64, available: usize, len: usize) -> Vec<f64> {
    if series.is_empty() {
        indicator::backfill(fallback, available, len)
    } else {
        indicator::trail(series, len)
    }
}

fn warn_if_short(len: usize, timeframe: &str) {
    if len < MIN_CANDLES {
        tracing::warn!(
            len,
            min = MIN_CANDLES,
            timeframe,
            "insufficient candles for a fully-formed report; best effort"
        );
    }
}

pub fn intraday_report(candles: &[Candle], cfg: &IndicatorConfig) -> Option<IntradayReport> {
    if candles.is_empty() {
        return None;
    }
    warn_if_short(candles.len(), "intraday");

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let current_price = *closes.last()?;
    let ema_now = ema(&closes, cfg.ema_period)?;
    let macd_now = macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal)?.macd;
    let rsi_fast_now = rsi(&closes, cfg.rsi_fast).unwrap_or(50.0);
    let rsi_slow_now = rsi(&closes, cfg.rsi_slow).unwrap_or(50.0);

    let mid_prices: Vec<f64> = indicator::trail(
        closes.iter().map(|c| indicator::round_to(*c, 1)).collect(),
        cfg.series_len,
    );

    // Series are recomputed from scratch per index rather than kept
    // incrementally; quadratic, but the batches are capped at ~50 points.
    let mut ema_series = Vec::new();
    for i in cfg.ema_period..closes.len() {
        if let Some(v) = ema(&closes[..=i], cfg.ema_period) {
            ema_series.push(indicator::round_to(v, 3));
        }
    }

    let mut macd_series = Vec::new();
    for i in cfg.macd_slow..closes.len() {
        if let Some(m) = macd(&closes[..=i], cfg.macd_fast, cfg.macd_slow, cfg.macd_signal) {
            macd_series.push(indicator::round_to(m.macd, 3));
        }
    }

    // The fast RSI series samples a fixed-width window (rsi_slow points) at
    // each step instead of the growing prefix, as the feed it replaces did.
    let window = cfg.rsi_slow;
    let mut rsi_fast_series = Vec::new();
    for i in window..closes.len() {
        if let Some(v) = rsi(&closes[i + 1 - window..=i], cfg.rsi_fast) {
            rsi_fast_series.push(indicator::round_to(v, 2));
        }
    }

    let mut rsi_slow_series = Vec::new();
    for i in window..closes.len() {
        if let Some(v) = rsi(&closes[..=i], cfg.rsi_slow) {
            rsi_slow_series.push(indicator::round_to(v, 2));
        }
    }

    let available = closes.len();
    Some(IntradayReport {
        current_price,
        ema: ema_now,
        macd: macd_now,
        rsi_fast: rsi_fast_now,
        rsi_slow: rsi_slow_now,
        mid_prices,
        ema_series: finish_series(
            ema_series,
            indicator::round_to(ema_now, 3),
            available,
            cfg.series_len,
        ),
        macd_series: finish_series(
            macd_series,
            indicator::round_to(macd_now, 3),
            available,
            cfg.series_len,
        ),
        rsi_fast_series: finish_series(
            rsi_fast_series,
            indicator::round_to(rsi_fast_now, 2),
            available,
            cfg.series_len,
        ),
        rsi_slow_series: finish_series(
            rsi_slow_series,
            indicator::round_to(rsi_slow_now, 2),
            available,
            cfg.series_len,
        ),
    })
}

pub fn long_term_report(candles: &[Candle], cfg: &IndicatorConfig) -> Option<LongTermReport> {
    if candles.is_empty() {
        return None;
    }
    warn_if_short(candles.len(), "long-term");

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    let ema_now = ema(&closes, cfg.ema_period)?;
    let ema_long_now = ema(&closes, cfg.ema_long_period)?;

    // Short ATR looks only at the most recent bars.
    let short = cfg.atr_short_period.min(closes.len());
    let tail = closes.len() - short;
    let atr_short_now = atr(
        &highs[tail..],
        &lows[tail..],
        &closes[tail..],
        cfg.atr_short_period,
    )?;
    let atr_now = atr(&highs, &lows, &closes, cfg.atr_period)?;

    let current_volume = *volumes.last()?;
    let avg_volume = volumes.iter().sum::<f64>() / volumes.len() as f64;

    let mut macd_series = Vec::new();
    for i in cfg.macd_slow..closes.len() {
        if let Some(m) = macd(&closes[..=i], cfg.macd_fast, cfg.macd_slow, cfg.macd_signal) {
            macd_series.push(indicator::round_to(m.macd, 3));
        }
    }
    let mut rsi_slow_series = Vec::new();
    for i in cfg.rsi_slow..closes.len() {
        if let Some(v) = rsi(&closes[..=i], cfg.rsi_slow) {
            rsi_slow_series.push(indicator::round_to(v, 3));
        }
    }

    let macd_fallback = macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal)
        .map(|m| indicator::round_to(m.macd, 3))
        .unwrap_or(0.0);
    let rsi_fallback = rsi(&closes, cfg.rsi_slow)
        .map(|v| indicator::round_to(v, 3))
        .unwrap_or(50.0);

    let available = closes.len();
    Some(LongTermReport {
        ema: ema_now,
        ema_long: ema_long_now,
        atr_short: atr_short_now,
        atr: atr_now,
        current_volume,
        avg_volume,
        macd_series: finish_series(macd_series, macd_fallback, available, cfg.series_len),
        rsi_slow_series: finish_series(rsi_slow_series, rsi_fallback, available, cfg.series_len),
    })
}
