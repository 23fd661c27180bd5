use crate::model::sample::{WindowPhase, WindowSample};
use crate::model::tick::Tick;

/// Outcome of offering one inbound tick to the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The sampling interval has not elapsed; the tick was discarded.
    /// This is a throttle, not a queue: discarded ticks are never replayed.
    Throttled,
    /// Admitted while still collecting bootstrap history.
    HistoryCollected { collected: usize, needed: usize },
    /// The admission that completed the bootstrap phase (emitted once).
    BootstrapComplete { collected: usize },
    /// Real-time admission; the analysis pipeline should run.
    SampleAdmitted,
}

/// Fixed-capacity ring of window samples with FIFO eviction. The backing
/// vector is allocated once and overwritten in place via a write cursor.
#[derive(Debug, Clone)]
pub struct SampleRing {
    buf: Vec<WindowSample>,
    capacity: usize,
    // Index of the oldest sample once the ring is full; always 0 before that.
    head: usize,
}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be > 0");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn push(&mut self, sample: WindowSample) {
        if self.buf.len() < self.capacity {
            self.buf.push(sample);
        } else {
            self.buf[self.head] = sample;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples oldest -> newest.
    pub fn iter(&self) -> impl Iterator<Item = &WindowSample> {
        let (tail, head) = self.buf.split_at(self.head);
        head.iter().chain(tail.iter())
    }

    pub fn to_vec(&self) -> Vec<WindowSample> {
        self.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&WindowSample> {
        self.iter().last()
    }
}

/// Two-phase sliding window over admitted ticks.
///
/// Admission is wall-clock gated: a tick is admitted only when at least
/// `interval_ms` has elapsed since the previous admission, so a burst of
/// ticks collapses to one sample per interval. Samples are therefore in
/// non-decreasing timestamp order by construction.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    ring: SampleRing,
    phase: WindowPhase,
    interval_ms: u64,
    // Admissions required to leave bootstrap. The reference behavior this
    // reproduces switches at capacity - 1, one short of a full ring; the
    // boundary is configurable rather than silently "fixed".
    bootstrap_threshold: usize,
    last_record_ms: Option<u64>,
}

impl SlidingWindow {
    pub fn new(capacity: usize, interval_ms: u64, bootstrap_threshold: usize) -> Self {
        assert!(interval_ms > 0, "sampling interval must be > 0");
        assert!(
            bootstrap_threshold >= 1 && bootstrap_threshold <= capacity,
            "bootstrap threshold must be in 1..=capacity"
        );
        Self {
            ring: SampleRing::new(capacity),
            phase: WindowPhase::CollectingHistory,
            interval_ms,
            bootstrap_threshold,
            last_record_ms: None,
        }
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn samples(&self) -> &SampleRing {
        &self.ring
    }

    pub fn last_record_ms(&self) -> Option<u64> {
        self.last_record_ms
    }

    /// Offer one tick. At most one admission per sampling interval; the
    /// phase transition is one-directional.
    pub fn observe(&mut self, tick: &Tick, now_ms: u64) -> WindowEvent {
        if let Some(last) = self.last_record_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return WindowEvent::Throttled;
            }
        }
        self.last_record_ms = Some(now_ms);
        self.ring.push(WindowSample::from_tick(tick, self.phase));

        match self.phase {
            WindowPhase::CollectingHistory => {
                let collected = self.ring.len();
                if collected >= self.bootstrap_threshold {
                    self.phase = WindowPhase::Realtime;
                    WindowEvent::BootstrapComplete { collected }
                } else {
                    WindowEvent::HistoryCollected {
                        collected,
                        needed: self.bootstrap_threshold,
                    }
                }
            }
            WindowPhase::Realtime => WindowEvent::SampleAdmitted,
        }
    }
}
