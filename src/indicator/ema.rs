/// Exponential moving average over a complete series, recomputed per call.
///
/// Recursive smoothing with alpha = 2 / (period + 1), seeded from the first
/// value (the `adjust=False` convention). Returns None only for an empty
/// series; shorter-than-`period + 1` input yields a best-effort value and a
/// warning rather than a failure.
pub fn ema(series: &[f64], period: usize) -> Option<f64> {
    assert!(period > 0, "EMA period must be > 0");
    if !series.is_empty() && series.len() < period + 1 {
        tracing::warn!(
            len = series.len(),
            period,
            "insufficient data for a fully-windowed EMA; returning best effort"
        );
    }
    ema_sequence(series, period).last().copied()
}

/// The running EMA value at every index of the input, oldest first.
pub fn ema_sequence(series: &[f64], period: usize) -> Vec<f64> {
    assert!(period > 0, "EMA period must be > 0");
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len());
    let mut prev = match series.first() {
        Some(&seed) => seed,
        None => return out,
    };
    out.push(prev);
    for &price in &series[1..] {
        prev = alpha * price + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}
