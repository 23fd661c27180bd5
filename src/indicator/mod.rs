pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;

/// Keep only the newest `len` points of an exposed series, oldest first.
pub fn trail(mut series: Vec<f64>, len: usize) -> Vec<f64> {
    if series.len() > len {
        series.drain(..series.len() - len);
    }
    series
}

/// Stand-in series for when no point was computable: repeat the latest
/// scalar once per available sample, capped at `len`. Keeps downstream
/// consumers free of empty-series edge cases.
pub fn backfill(scalar: f64, available: usize, len: usize) -> Vec<f64> {
    vec![scalar; available.min(len)]
}

/// Round to a fixed number of decimal places for presentation series.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
