use okx_quant::indicator::ema::{ema, ema_sequence};

#[test]
fn seed_is_first_value() {
    assert_eq!(ema(&[42.0], 3), Some(42.0));
    let seq = ema_sequence(&[42.0, 44.0], 3);
    assert!((seq[0] - 42.0).abs() < f64::EPSILON);
}

#[test]
fn recursive_smoothing_matches_hand_computation() {
    // period 3 -> alpha = 0.5: 2.0 -> 3.5 -> 5.75
    let series = [2.0, 5.0, 8.0];
    let seq = ema_sequence(&series, 3);
    assert_eq!(seq.len(), 3);
    assert!((seq[1] - 3.5).abs() < 1e-12);
    assert!((seq[2] - 5.75).abs() < 1e-12);
    assert!((ema(&series, 3).unwrap() - 5.75).abs() < 1e-12);
}

#[test]
fn empty_series_returns_none() {
    assert_eq!(ema(&[], 5), None);
    assert!(ema_sequence(&[], 5).is_empty());
}

#[test]
fn output_stays_within_input_bounds() {
    let series: Vec<f64> = (0..60)
        .map(|i: i64| 100.0 + ((i * 37) % 11) as f64 - 5.0)
        .collect();
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for period in 1..=30 {
        let v = ema(&series, period).unwrap();
        assert!(v >= min && v <= max, "period {period}: {v} out of bounds");
    }
}

#[test]
fn short_series_is_best_effort() {
    // fewer than period + 1 points still yields a value
    let v = ema(&[10.0, 11.0], 20).unwrap();
    assert!(v > 10.0 && v < 11.0);
}

#[test]
fn period_one_tracks_the_series() {
    let v = ema(&[3.0, 7.0, 9.0], 1).unwrap();
    assert!((v - 9.0).abs() < 1e-12);
}

#[test]
#[should_panic(expected = "EMA period must be > 0")]
fn zero_period_panics() {
    ema(&[1.0], 0);
}
