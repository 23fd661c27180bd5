use std::fmt::Write;

use crate::analysis;
use crate::model::snapshot::Snapshot;
use crate::report::{IntradayReport, LongTermReport};

/// Renders the natural-language payloads handed to the LLM collaborator.
/// This module only produces text; the model call and its reply live
/// entirely outside the core.
pub struct PromptGenerator {
    started_ms: u64,
    invocation_count: u64,
}

impl PromptGenerator {
    pub fn new(started_ms: u64) -> Self {
        Self {
            started_ms,
            invocation_count: 0,
        }
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocation_count
    }

    /// Sliding-window analysis request: historical context, the latest
    /// realtime sample, and the full ordered price history.
    pub fn sliding_window_prompt(&mut self, snapshot: &Snapshot) -> String {
        self.invocation_count += 1;

        if snapshot.price_history.len() < 2 {
            return "Insufficient data, waiting for more samples...".to_string();
        }

        let historical = snapshot.historical_samples();
        let latest = snapshot
            .latest_sample()
            .expect("non-empty history checked above");
        let hist_stats = analysis::summary_stats(&analysis::valid_prices(historical));
        let relative = analysis::relative_change(historical, latest);
        let evolution = analysis::price_evolution(&snapshot.price_history)
            .unwrap_or_else(|| "not enough samples".to_string());
        let history_json = serde_json::to_string_pretty(&snapshot.price_history)
            .unwrap_or_else(|_| "[]".to_string());

        let mut prompt = String::new();
        let _ = writeln!(
            prompt,
            "As a professional cryptocurrency trading analyst, analyze this sliding-window data:\n"
        );
        let _ = writeln!(prompt, "Overview:");
        let _ = writeln!(prompt, "- Analysis ID: #{}", snapshot.metadata.analysis_id);
        let _ = writeln!(
            prompt,
            "- Window strategy: {}",
            snapshot.metadata.window_strategy
        );
        let _ = writeln!(
            prompt,
            "- Total data points: {}",
            snapshot.metadata.total_data_points
        );
        let _ = writeln!(
            prompt,
            "- Total time range: {:.1}s\n",
            snapshot.metadata.total_time_range_secs
        );

        let _ = writeln!(prompt, "Historical context:");
        let _ = writeln!(prompt, "- Data points: {}", historical.len());
        match &hist_stats {
            Some(stats) => {
                let _ = writeln!(
                    prompt,
                    "- Summary: min ${:.2}, max ${:.2}, mean ${:.2}, range ${:.2} ({:.3}%)",
                    stats.min_price,
                    stats.max_price,
                    stats.avg_price,
                    stats.price_range,
                    stats.range_pct
                );
            }
            None => {
                let _ = writeln!(prompt, "- Summary: no valid prices");
            }
        }

        let _ = writeln!(prompt, "\nRealtime update (most recent sample):");
        match latest.last_price {
            Some(price) => {
                let _ = writeln!(prompt, "- Latest price: ${price}");
            }
            None => {
                let _ = writeln!(prompt, "- Latest price: unavailable");
            }
        }
        let _ = writeln!(prompt, "- Timestamp: {}", latest.timestamp);
        let _ = writeln!(
            prompt,
            "- Change vs. history: {}",
            relative
                .map(|r| r.label())
                .unwrap_or_else(|| "insufficient data".to_string())
        );

        let _ = writeln!(prompt, "\nComplete timeline:");
        let _ = writeln!(
            prompt,
            "- From {} to {}",
            snapshot.price_history[0].timestamp, latest.timestamp
        );
        let _ = writeln!(prompt, "- Price evolution: {evolution}");

        let _ = writeln!(
            prompt,
            "\nFull price history (ordered oldest -> newest):\n{history_json}\n"
        );
        let _ = writeln!(
            prompt,
            "Analyze: (1) the historical trend, (2) the impact of the latest \
             sample, (3) continuation vs. reversal signals, (4) a trading \
             recommendation with risk level, and (5) dynamic support and \
             resistance levels. Focus on what the newest sample means inside \
             the historical context."
        );
        prompt
    }

    /// Market-state section built from the batch candle reports, all series
    /// ordered oldest -> newest.
    pub fn market_state_prompt(
        &mut self,
        now_ms: u64,
        inst_id: &str,
        intraday: &IntradayReport,
        long_term: &LongTermReport,
    ) -> String {
        self.invocation_count += 1;
        let minutes_running = now_ms.saturating_sub(self.started_ms) / 60_000;

        let mut prompt = String::new();
        let _ = writeln!(
            prompt,
            "It has been {} minutes since you started trading and you have been \
             invoked {} times. ALL PRICE OR SIGNAL DATA BELOW IS ORDERED: OLDEST -> NEWEST\n",
            minutes_running, self.invocation_count
        );
        let _ = writeln!(prompt, "ALL {inst_id} DATA");
        let _ = writeln!(
            prompt,
            "current_price = {}, current_ema = {:.3}, current_macd = {:.3}, current_rsi (fast) = {:.2}\n",
            intraday.current_price, intraday.ema, intraday.macd, intraday.rsi_fast
        );
        let _ = writeln!(prompt, "Intraday series (oldest -> latest):\n");
        let _ = writeln!(prompt, "Mid prices: {:?}\n", intraday.mid_prices);
        let _ = writeln!(prompt, "EMA indicators: {:?}\n", intraday.ema_series);
        let _ = writeln!(prompt, "MACD indicators: {:?}\n", intraday.macd_series);
        let _ = writeln!(
            prompt,
            "RSI indicators (fast): {:?}\n",
            intraday.rsi_fast_series
        );
        let _ = writeln!(
            prompt,
            "RSI indicators (slow): {:?}\n",
            intraday.rsi_slow_series
        );
        let _ = writeln!(prompt, "Longer-term context:\n");
        let _ = writeln!(
            prompt,
            "EMA: {:.3} vs. long EMA: {:.3}\n",
            long_term.ema, long_term.ema_long
        );
        let _ = writeln!(
            prompt,
            "Short ATR: {:.3} vs. ATR: {:.3}\n",
            long_term.atr_short, long_term.atr
        );
        let _ = writeln!(
            prompt,
            "Current Volume: {:.3} vs. Average Volume: {:.3}\n",
            long_term.current_volume, long_term.avg_volume
        );
        let _ = writeln!(prompt, "MACD indicators: {:?}\n", long_term.macd_series);
        let _ = writeln!(
            prompt,
            "RSI indicators (slow): {:?}",
            long_term.rsi_slow_series
        );
        prompt
    }
}
