use okx_quant::model::sample::WindowPhase;
use okx_quant::okx::types::RawTicker;
use okx_quant::session::{AnalysisSession, SessionEvent};

fn raw(last: &str) -> RawTicker {
    RawTicker {
        inst_id: "BTC-USDT".to_string(),
        last: last.to_string(),
        bid_px: "N/A".to_string(),
        ask_px: "N/A".to_string(),
        high_24h: "N/A".to_string(),
        low_24h: "N/A".to_string(),
        vol_24h: "N/A".to_string(),
    }
}

#[test]
fn bootstrap_then_snapshots() {
    let mut session = AnalysisSession::new("BTC-USDT", 5, 10_000, 4, 0);
    let mut events = Vec::new();
    for i in 0..5u64 {
        let price = format!("{}", 100.0 + i as f64);
        events.push(session.on_ticker(&raw(&price), i * 10_000));
    }

    for (i, event) in events.iter().take(3).enumerate() {
        match event {
            SessionEvent::Collecting { collected, needed } => {
                assert_eq!(*collected, i + 1);
                assert_eq!(*needed, 4);
            }
            other => panic!("expected Collecting, got {other:?}"),
        }
    }
    assert!(matches!(
        events[3],
        SessionEvent::BootstrapComplete { collected: 4 }
    ));
    let SessionEvent::Snapshot(snapshot) = &events[4] else {
        panic!("expected Snapshot, got {:?}", events[4]);
    };
    assert_eq!(snapshot.metadata.analysis_id, 1);
    assert_eq!(snapshot.metadata.total_data_points, 5);
    assert_eq!(snapshot.metadata.trading_pair, "BTC-USDT");
    assert!(snapshot.metadata.window_strategy.contains("sliding window"));
    assert!((snapshot.metadata.total_time_range_secs - 40.0).abs() < 1e-9);
    assert_eq!(session.window().phase(), WindowPhase::Realtime);
    assert_eq!(session.analysis_count(), 1);
}

#[test]
fn throttled_tickers_do_not_advance_anything() {
    let mut session = AnalysisSession::new("BTC-USDT", 5, 10_000, 4, 0);
    session.on_ticker(&raw("100.0"), 0);
    for t in 1..9_999u64 {
        if t % 1_000 == 0 {
            assert!(matches!(
                session.on_ticker(&raw("100.0"), t),
                SessionEvent::Throttled
            ));
        }
    }
    assert_eq!(session.window().samples().len(), 1);
    assert_eq!(session.analysis_count(), 0);
}

#[test]
fn unavailable_price_does_not_halt_the_stream() {
    let mut session = AnalysisSession::new("BTC-USDT", 4, 1_000, 3, 0);
    session.on_ticker(&raw("100.0"), 0);
    session.on_ticker(&raw("101.0"), 1_000);
    session.on_ticker(&raw("102.0"), 2_000);
    let event = session.on_ticker(&raw("N/A"), 3_000);
    let SessionEvent::Snapshot(snapshot) = event else {
        panic!("expected Snapshot, got {event:?}");
    };
    assert_eq!(snapshot.latest_sample().unwrap().last_price, None);
    // Stats still come from the valid prices around the sentinel.
    assert!(snapshot.statistical_summary.is_some());
    assert_eq!(snapshot.historical_samples().len(), 3);
}

#[test]
fn analysis_ids_increment_per_snapshot() {
    let mut session = AnalysisSession::new("BTC-USDT", 3, 1_000, 2, 0);
    session.on_ticker(&raw("100.0"), 0);
    session.on_ticker(&raw("100.5"), 1_000);
    let mut ids = Vec::new();
    for i in 2..5u64 {
        if let SessionEvent::Snapshot(snapshot) = session.on_ticker(&raw("101.0"), i * 1_000) {
            ids.push(snapshot.metadata.analysis_id);
        }
    }
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn minutes_running_counts_whole_minutes() {
    let session = AnalysisSession::new("BTC-USDT", 5, 10_000, 4, 60_000);
    assert_eq!(session.minutes_running(60_000), 0);
    assert_eq!(session.minutes_running(179_999), 1);
    assert_eq!(session.minutes_running(180_000), 2);
}
