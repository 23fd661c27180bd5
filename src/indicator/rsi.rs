/// Relative strength index with simple rolling means of gains and losses
/// over the last `period` deltas (not Wilder's smoothing).
///
/// Singularity policy: zero average loss with any gain saturates to 100;
/// zero gain and zero loss (a flat window, 0/0) is normalized to a neutral
/// 50. Returns None only when fewer than two points are supplied.
pub fn rsi(series: &[f64], period: usize) -> Option<f64> {
    assert!(period > 0, "RSI period must be > 0");
    if series.len() < 2 {
        return None;
    }
    if series.len() < period + 1 {
        tracing::warn!(
            len = series.len(),
            period,
            "insufficient data for a fully-windowed RSI; returning best effort"
        );
    }

    let deltas: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let tail = &deltas[deltas.len().saturating_sub(period)..];
    let n = tail.len() as f64;
    let avg_gain = tail.iter().filter(|d| **d > 0.0).sum::<f64>() / n;
    let avg_loss = tail.iter().filter(|d| **d < 0.0).map(|d| -d).sum::<f64>() / n;

    if avg_loss == 0.0 {
        return Some(if avg_gain == 0.0 { 50.0 } else { 100.0 });
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
