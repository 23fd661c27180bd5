use super::ema::ema_sequence;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// The raw MACD line (fast EMA - slow EMA) at every index of the input.
pub fn macd_line(series: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_seq = ema_sequence(series, fast);
    let slow_seq = ema_sequence(series, slow);
    fast_seq
        .iter()
        .zip(slow_seq.iter())
        .map(|(f, s)| f - s)
        .collect()
}

/// MACD over a complete series: pointwise fast/slow EMAs, a signal EMA over
/// the growing MACD line, and histogram = macd - signal. Recomputed from
/// scratch per call; at window sizes <= 50 the quadratic cost of series
/// production is acceptable.
pub fn macd(series: &[f64], fast: usize, slow: usize, signal: usize) -> Option<Macd> {
    assert!(fast > 0 && slow > 0 && signal > 0, "MACD periods must be > 0");
    if series.is_empty() {
        return None;
    }
    if series.len() < slow + 1 {
        tracing::warn!(
            len = series.len(),
            slow,
            "insufficient data for a fully-windowed MACD; returning best effort"
        );
    }
    let line = macd_line(series, fast, slow);
    let signal_seq = ema_sequence(&line, signal);
    let macd_value = *line.last()?;
    let signal_value = *signal_seq.last()?;
    Some(Macd {
        macd: macd_value,
        signal: signal_value,
        histogram: macd_value - signal_value,
    })
}
