/// Average true range: simple mean of the last `period` true ranges.
///
/// TR = max(high - low, |high - prev close|, |low - prev close|); the first
/// step has no previous close and uses high - low alone. Inputs are consumed
/// up to the shortest of the three slices. Returns None only when empty.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<f64> {
    assert!(period > 0, "ATR period must be > 0");
    let len = highs.len().min(lows.len()).min(closes.len());
    if len == 0 {
        return None;
    }
    if len < period + 1 {
        tracing::warn!(
            len,
            period,
            "insufficient data for a fully-windowed ATR; returning best effort"
        );
    }

    let mut true_ranges = Vec::with_capacity(len);
    for i in 0..len {
        let hl = highs[i] - lows[i];
        let tr = if i == 0 {
            hl
        } else {
            let prev_close = closes[i - 1];
            hl.max((highs[i] - prev_close).abs())
                .max((lows[i] - prev_close).abs())
        };
        true_ranges.push(tr);
    }
    let tail = &true_ranges[true_ranges.len().saturating_sub(period)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}
