use serde::Serialize;

use crate::model::sample::WindowSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    Unknown,
}

/// First-to-last percentage move over the window's valid prices.
#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub change_pct: Option<f64>,
}

impl Trend {
    pub fn label(&self) -> String {
        match (self.direction, self.change_pct) {
            (TrendDirection::Up, Some(pct)) => format!("↑{pct:.3}%"),
            (TrendDirection::Down, Some(pct)) => format!("↓{:.3}%", pct.abs()),
            (TrendDirection::Flat, Some(pct)) => format!("→{pct:.3}%"),
            _ => "unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityBucket {
    High,
    Medium,
    Low,
    Unknown,
}

/// Mean absolute pairwise step change, bucketed.
#[derive(Debug, Clone, Serialize)]
pub struct Volatility {
    pub bucket: VolatilityBucket,
    pub avg_step_pct: Option<f64>,
}

impl Volatility {
    pub fn label(&self) -> String {
        match (self.bucket, self.avg_step_pct) {
            (VolatilityBucket::High, Some(pct)) => format!("high({pct:.3}%)"),
            (VolatilityBucket::Medium, Some(pct)) => format!("medium({pct:.3}%)"),
            (VolatilityBucket::Low, Some(pct)) => format!("low({pct:.3}%)"),
            _ => "unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowAnalysis {
    pub window_secs: f64,
    pub trend: Trend,
    pub volatility: Volatility,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub price_range: f64,
    pub range_pct: f64,
}

/// Latest sample vs. the mean of all prior samples.
#[derive(Debug, Clone, Serialize)]
pub struct RelativeChange {
    pub change_pct: f64,
}

impl RelativeChange {
    pub fn label(&self) -> String {
        if self.change_pct > 0.0 {
            format!("above historical mean +{:.3}%", self.change_pct)
        } else if self.change_pct < 0.0 {
            format!("below historical mean {:.3}%", self.change_pct)
        } else {
            "at historical mean".to_string()
        }
    }
}

/// Prices usable for math: samples carrying the "unavailable" sentinel are
/// skipped, never treated as zero.
pub fn valid_prices(samples: &[WindowSample]) -> Vec<f64> {
    samples.iter().filter_map(|s| s.last_price).collect()
}

pub fn classify_trend(prices: &[f64]) -> Trend {
    let (Some(first), Some(last)) = (prices.first(), prices.last()) else {
        return Trend {
            direction: TrendDirection::Unknown,
            change_pct: None,
        };
    };
    if prices.len() < 2 || *first == 0.0 {
        return Trend {
            direction: TrendDirection::Unknown,
            change_pct: None,
        };
    }
    let change_pct = (last - first) / first * 100.0;
    let direction = if change_pct > 0.1 {
        TrendDirection::Up
    } else if change_pct < -0.1 {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };
    Trend {
        direction,
        change_pct: Some(change_pct),
    }
}

pub fn classify_volatility(prices: &[f64]) -> Volatility {
    if prices.len() < 2 {
        return Volatility {
            bucket: VolatilityBucket::Unknown,
            avg_step_pct: None,
        };
    }
    let steps: Vec<f64> = prices
        .windows(2)
        .map(|w| ((w[1] - w[0]) / w[0] * 100.0).abs())
        .collect();
    let avg = steps.iter().sum::<f64>() / steps.len() as f64;
    let bucket = if avg > 0.3 {
        VolatilityBucket::High
    } else if avg > 0.1 {
        VolatilityBucket::Medium
    } else {
        VolatilityBucket::Low
    };
    Volatility {
        bucket,
        avg_step_pct: Some(avg),
    }
}

pub fn summary_stats(prices: &[f64]) -> Option<SummaryStats> {
    if prices.is_empty() {
        return None;
    }
    let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_price = prices.iter().sum::<f64>() / prices.len() as f64;
    let price_range = max_price - min_price;
    let range_pct = if min_price != 0.0 {
        price_range / min_price * 100.0
    } else {
        0.0
    };
    Some(SummaryStats {
        min_price,
        max_price,
        avg_price,
        price_range,
        range_pct,
    })
}

pub fn relative_change(historical: &[WindowSample], latest: &WindowSample) -> Option<RelativeChange> {
    let hist_prices = valid_prices(historical);
    let latest_price = latest.last_price?;
    if hist_prices.is_empty() {
        return None;
    }
    let mean = hist_prices.iter().sum::<f64>() / hist_prices.len() as f64;
    if mean == 0.0 {
        return None;
    }
    Some(RelativeChange {
        change_pct: (latest_price - mean) / mean * 100.0,
    })
}

/// Roughly four evenly spaced waypoints of the price path, for display.
pub fn price_evolution(samples: &[WindowSample]) -> Option<String> {
    if samples.len() < 3 {
        return None;
    }
    let step = (samples.len() / 4).max(1);
    let waypoints: Vec<String> = samples
        .iter()
        .step_by(step)
        .map(|s| format!("${:.2}", s.last_price.unwrap_or(0.0)))
        .collect();
    Some(waypoints.join(" → "))
}

/// The per-admission console-grade summary: window span, trend, volatility.
/// With fewer than two valid prices everything degrades to unknown instead
/// of failing.
pub fn analyze_window(samples: &[WindowSample]) -> WindowAnalysis {
    let prices = valid_prices(samples);
    if prices.len() < 2 {
        return WindowAnalysis {
            window_secs: 0.0,
            trend: Trend {
                direction: TrendDirection::Unknown,
                change_pct: None,
            },
            volatility: Volatility {
                bucket: VolatilityBucket::Unknown,
                avg_step_pct: None,
            },
        };
    }
    let window_secs = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => {
            last.unix_time_ms.saturating_sub(first.unix_time_ms) as f64 / 1_000.0
        }
        _ => 0.0,
    };
    WindowAnalysis {
        window_secs,
        trend: classify_trend(&prices),
        volatility: classify_volatility(&prices),
    }
}
