use okx_quant::analysis;
use okx_quant::model::sample::{WindowPhase, WindowSample};
use okx_quant::model::snapshot::Snapshot;
use okx_quant::model::tick::Tick;
use okx_quant::prompt::PromptGenerator;
use okx_quant::report::{IntradayReport, LongTermReport};

fn snapshot_with_prices(prices: &[f64]) -> Snapshot {
    let samples: Vec<WindowSample> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let tick = Tick::from_price("BTC-USDT", *p, i as u64 * 10_000);
            WindowSample::from_tick(&tick, WindowPhase::Realtime)
        })
        .collect();
    let window_analysis = analysis::analyze_window(&samples);
    let stats = analysis::summary_stats(&analysis::valid_prices(&samples));
    Snapshot::assemble(
        4,
        "BTC-USDT",
        "historical 190s + realtime 10s sliding window",
        samples,
        window_analysis,
        stats,
        100_000,
    )
}

#[test]
fn sliding_window_prompt_carries_every_section() {
    let mut prompts = PromptGenerator::new(0);
    let snapshot = snapshot_with_prices(&[100.0, 101.0, 102.0, 103.0, 104.0]);
    let text = prompts.sliding_window_prompt(&snapshot);

    assert!(text.contains("Analysis ID: #4"));
    assert!(text.contains("Window strategy: historical 190s + realtime 10s sliding window"));
    assert!(text.contains("Total data points: 5"));
    assert!(text.contains("Historical context:"));
    assert!(text.contains("Realtime update (most recent sample):"));
    assert!(text.contains("Latest price: $104"));
    assert!(text.contains("above historical mean +"));
    assert!(text.contains("Complete timeline:"));
    // The ordered history is embedded as pretty JSON.
    assert!(text.contains("\"trading_pair\""));
    assert!(text.contains("oldest -> newest"));
    assert_eq!(prompts.invocation_count(), 1);
}

#[test]
fn short_history_short_circuits() {
    let mut prompts = PromptGenerator::new(0);
    let snapshot = snapshot_with_prices(&[100.0]);
    let text = prompts.sliding_window_prompt(&snapshot);
    assert_eq!(text, "Insufficient data, waiting for more samples...");
    // Still counts as an invocation.
    assert_eq!(prompts.invocation_count(), 1);
}

#[test]
fn market_state_prompt_reports_runtime_and_series() {
    let mut prompts = PromptGenerator::new(0);
    let intraday = IntradayReport {
        current_price: 104.0,
        ema: 101.5,
        macd: 0.42,
        rsi_fast: 61.0,
        rsi_slow: 55.5,
        mid_prices: vec![100.0, 101.0, 102.0],
        ema_series: vec![100.5, 101.0, 101.5],
        macd_series: vec![0.1, 0.3, 0.42],
        rsi_fast_series: vec![48.0, 55.0, 61.0],
        rsi_slow_series: vec![50.0, 52.0, 55.5],
    };
    let long_term = LongTermReport {
        ema: 100.8,
        ema_long: 99.9,
        atr_short: 1.2,
        atr: 1.8,
        current_volume: 49.0,
        avg_volume: 29.5,
        macd_series: vec![0.2, 0.25],
        rsi_slow_series: vec![51.0, 53.0],
    };

    let text = prompts.market_state_prompt(300_000, "BTC-USDT", &intraday, &long_term);
    assert!(text.contains("It has been 5 minutes"));
    assert!(text.contains("invoked 1 times"));
    assert!(text.contains("OLDEST -> NEWEST"));
    assert!(text.contains("ALL BTC-USDT DATA"));
    assert!(text.contains("current_price = 104"));
    assert!(text.contains("Mid prices: [100.0, 101.0, 102.0]"));
    assert!(text.contains("RSI indicators (fast): [48.0, 55.0, 61.0]"));
    assert!(text.contains("Average Volume: 29.500"));
    assert_eq!(prompts.invocation_count(), 1);
}
