use serde::Serialize;

use crate::analysis::{SummaryStats, WindowAnalysis};
use crate::model::sample::WindowSample;

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMetadata {
    pub analysis_time: String,
    pub analysis_id: u64,
    pub window_strategy: String,
    pub total_data_points: usize,
    pub total_time_range_secs: f64,
    pub trading_pair: String,
}

/// The externally visible output unit: one per admitted real-time sample.
/// Assembly is pure; persistence and prompt generation are collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub price_history: Vec<WindowSample>,
    pub window_analysis: WindowAnalysis,
    pub statistical_summary: Option<SummaryStats>,
}

impl Snapshot {
    pub fn assemble(
        analysis_id: u64,
        trading_pair: &str,
        window_strategy: &str,
        price_history: Vec<WindowSample>,
        window_analysis: WindowAnalysis,
        statistical_summary: Option<SummaryStats>,
        now_ms: u64,
    ) -> Self {
        let total_time_range_secs = match (price_history.first(), price_history.last()) {
            (Some(first), Some(last)) => {
                last.unix_time_ms.saturating_sub(first.unix_time_ms) as f64 / 1_000.0
            }
            _ => 0.0,
        };
        let analysis_time = chrono::DateTime::from_timestamp_millis(now_ms as i64)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        Self {
            metadata: SnapshotMetadata {
                analysis_time,
                analysis_id,
                window_strategy: window_strategy.to_string(),
                total_data_points: price_history.len(),
                total_time_range_secs,
                trading_pair: trading_pair.to_string(),
            },
            price_history,
            window_analysis,
            statistical_summary,
        }
    }

    /// Oldest samples, everything but the most recent admission.
    pub fn historical_samples(&self) -> &[WindowSample] {
        let len = self.price_history.len();
        &self.price_history[..len.saturating_sub(1)]
    }

    pub fn latest_sample(&self) -> Option<&WindowSample> {
        self.price_history.last()
    }
}
