use crate::analysis;
use crate::model::snapshot::Snapshot;
use crate::model::tick::Tick;
use crate::okx::types::RawTicker;
use crate::window::{SlidingWindow, WindowEvent};

/// What the ingestion loop should do after one inbound ticker.
#[derive(Debug)]
pub enum SessionEvent {
    /// Inside the sampling interval; nothing happened.
    Throttled,
    Collecting { collected: usize, needed: usize },
    BootstrapComplete { collected: usize },
    /// A real-time sample was admitted and analyzed.
    Snapshot(Box<Snapshot>),
}

/// Per-instrument analysis context.
///
/// Owns the sliding window plus the run counters that the pipeline needs
/// (analysis sequence number, start time). Each instrument gets its own
/// session; nothing here is shared across instruments.
pub struct AnalysisSession {
    inst_id: String,
    window: SlidingWindow,
    window_strategy: String,
    analysis_count: u64,
    started_ms: u64,
}

impl AnalysisSession {
    pub fn new(
        inst_id: &str,
        capacity: usize,
        interval_ms: u64,
        bootstrap_threshold: usize,
        now_ms: u64,
    ) -> Self {
        let interval_secs = interval_ms / 1_000;
        let history_secs = bootstrap_threshold as u64 * interval_secs;
        Self {
            inst_id: inst_id.to_string(),
            window: SlidingWindow::new(capacity, interval_ms, bootstrap_threshold),
            window_strategy: format!(
                "historical {history_secs}s + realtime {interval_secs}s sliding window"
            ),
            analysis_count: 0,
            started_ms: now_ms,
        }
    }

    pub fn analysis_count(&self) -> u64 {
        self.analysis_count
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn minutes_running(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms) / 60_000
    }

    /// Drive one inbound ticker through admission and, for real-time
    /// admissions, the full analysis pipeline.
    pub fn on_ticker(&mut self, raw: &RawTicker, now_ms: u64) -> SessionEvent {
        let tick = Tick::from_raw(raw, now_ms);
        match self.window.observe(&tick, now_ms) {
            WindowEvent::Throttled => SessionEvent::Throttled,
            WindowEvent::HistoryCollected { collected, needed } => {
                tracing::info!(
                    inst_id = %self.inst_id,
                    collected,
                    needed,
                    price = ?tick.last,
                    "Collecting history sample"
                );
                SessionEvent::Collecting { collected, needed }
            }
            WindowEvent::BootstrapComplete { collected } => {
                tracing::info!(
                    inst_id = %self.inst_id,
                    collected,
                    "Bootstrap complete; switching to realtime analysis"
                );
                SessionEvent::BootstrapComplete { collected }
            }
            WindowEvent::SampleAdmitted => {
                self.analysis_count += 1;
                let snapshot = self.emit_snapshot(now_ms);
                tracing::info!(
                    inst_id = %self.inst_id,
                    analysis_id = self.analysis_count,
                    window_secs = snapshot.window_analysis.window_secs,
                    trend = %snapshot.window_analysis.trend.label(),
                    volatility = %snapshot.window_analysis.volatility.label(),
                    "Realtime sample analyzed"
                );
                SessionEvent::Snapshot(Box::new(snapshot))
            }
        }
    }

    fn emit_snapshot(&self, now_ms: u64) -> Snapshot {
        let samples = self.window.samples().to_vec();
        let window_analysis = analysis::analyze_window(&samples);
        let stats = analysis::summary_stats(&analysis::valid_prices(&samples));
        Snapshot::assemble(
            self.analysis_count,
            &self.inst_id,
            &self.window_strategy,
            samples,
            window_analysis,
            stats,
            now_ms,
        )
    }
}
