use okx_quant::model::sample::{WindowPhase, WindowSample};
use okx_quant::model::tick::Tick;
use okx_quant::window::{SampleRing, SlidingWindow, WindowEvent};

fn tick(price: f64, t_ms: u64) -> Tick {
    Tick::from_price("BTC-USDT", price, t_ms)
}

fn sample(price: f64, t_ms: u64) -> WindowSample {
    WindowSample::from_tick(&tick(price, t_ms), WindowPhase::CollectingHistory)
}

#[test]
fn ring_evicts_oldest_first() {
    let mut ring = SampleRing::new(5);
    for i in 0..8u64 {
        ring.push(sample(100.0 + i as f64, i * 1_000));
    }
    assert_eq!(ring.len(), 5);
    let prices: Vec<f64> = ring.iter().filter_map(|s| s.last_price).collect();
    assert_eq!(prices, vec![103.0, 104.0, 105.0, 106.0, 107.0]);
    assert_eq!(ring.latest().unwrap().last_price, Some(107.0));
}

#[test]
fn ring_never_exceeds_capacity() {
    let capacity = 7;
    let extra = 20u64;
    let mut ring = SampleRing::new(capacity);
    for i in 0..(capacity as u64 + extra) {
        ring.push(sample(i as f64, i));
        assert!(ring.len() <= capacity);
    }
    // Retained window equals the last `capacity` inputs, in order.
    let kept: Vec<f64> = ring.iter().filter_map(|s| s.last_price).collect();
    let expected: Vec<f64> = (extra..extra + capacity as u64).map(|i| i as f64).collect();
    assert_eq!(kept, expected);
}

#[test]
fn sub_interval_ticks_are_throttled() {
    let mut window = SlidingWindow::new(20, 10_000, 19);
    // 50 ticks spaced 1s apart with a 10s interval -> exactly 5 admissions
    let mut admitted = 0;
    for i in 0..50u64 {
        match window.observe(&tick(100.0, i * 1_000), i * 1_000) {
            WindowEvent::Throttled => {}
            _ => admitted += 1,
        }
    }
    assert_eq!(admitted, 5);
    assert_eq!(window.samples().len(), 5);
}

#[test]
fn bootstrap_completes_one_short_of_capacity() {
    let mut window = SlidingWindow::new(20, 10_000, 19);
    let mut events = Vec::new();
    for i in 0..20u64 {
        events.push(window.observe(&tick(100.0, i * 10_000), i * 10_000));
    }
    assert_eq!(
        events[0],
        WindowEvent::HistoryCollected {
            collected: 1,
            needed: 19
        }
    );
    assert_eq!(
        events[17],
        WindowEvent::HistoryCollected {
            collected: 18,
            needed: 19
        }
    );
    assert_eq!(events[18], WindowEvent::BootstrapComplete { collected: 19 });
    assert_eq!(events[19], WindowEvent::SampleAdmitted);
    assert_eq!(window.phase(), WindowPhase::Realtime);
}

#[test]
fn threshold_is_configurable_up_to_capacity() {
    let mut window = SlidingWindow::new(5, 1_000, 5);
    for i in 0..4u64 {
        assert!(matches!(
            window.observe(&tick(1.0, i * 1_000), i * 1_000),
            WindowEvent::HistoryCollected { .. }
        ));
    }
    assert_eq!(
        window.observe(&tick(1.0, 4_000), 4_000),
        WindowEvent::BootstrapComplete { collected: 5 }
    );
}

#[test]
fn phase_never_reverts() {
    let mut window = SlidingWindow::new(4, 1_000, 3);
    let mut t = 0u64;
    for _ in 0..3 {
        window.observe(&tick(1.0, t), t);
        t += 1_000;
    }
    assert_eq!(window.phase(), WindowPhase::Realtime);
    // Many more admissions (wrapping the ring) plus throttled ticks in
    // between never produce another bootstrap event.
    for _ in 0..30 {
        assert_eq!(window.observe(&tick(2.0, t), t), WindowEvent::SampleAdmitted);
        assert_eq!(
            window.observe(&tick(2.0, t + 1), t + 1),
            WindowEvent::Throttled
        );
        assert_eq!(window.phase(), WindowPhase::Realtime);
        t += 1_000;
    }
}

#[test]
fn samples_stay_timestamp_ordered_across_wrap() {
    let mut window = SlidingWindow::new(5, 1_000, 4);
    for i in 0..12u64 {
        window.observe(&tick(1.0, i * 1_000), i * 1_000);
    }
    let times: Vec<u64> = window.samples().iter().map(|s| s.unix_time_ms).collect();
    assert_eq!(times.len(), 5);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn realtime_samples_are_tagged() {
    let mut window = SlidingWindow::new(4, 1_000, 3);
    for i in 0..4u64 {
        window.observe(&tick(1.0, i * 1_000), i * 1_000);
    }
    let phases: Vec<WindowPhase> = window.samples().iter().map(|s| s.data_type).collect();
    assert_eq!(
        phases,
        vec![
            WindowPhase::CollectingHistory,
            WindowPhase::CollectingHistory,
            WindowPhase::CollectingHistory,
            WindowPhase::Realtime,
        ]
    );
}

#[test]
#[should_panic(expected = "bootstrap threshold must be in 1..=capacity")]
fn oversized_threshold_panics() {
    SlidingWindow::new(5, 1_000, 6);
}
