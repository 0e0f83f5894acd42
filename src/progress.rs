//! Progress events for long-running generation.
//!
//! The pipeline reports `(current, total, label)` triples synchronously from
//! the thread that runs it. Sinks must return quickly; a
//! [`crossbeam_channel::Sender`] is the usual way to hand events to another
//! thread.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// A single progress event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Completed steps
    pub current: u32,
    /// Total steps
    pub total: u32,
    /// Label of the step that just started
    pub label: String,
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        f64::from(self.current) / f64::from(self.total)
    }

    /// Check if this is the final event.
    pub fn is_done(&self) -> bool {
        self.current >= self.total
    }
}

/// Receives progress events.
pub trait ProgressSink {
    /// Called once per event.
    fn report(&self, progress: Progress);
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

impl<F> ProgressSink for F
where
    F: Fn(Progress),
{
    fn report(&self, progress: Progress) {
        self(progress)
    }
}

impl ProgressSink for Sender<Progress> {
    fn report(&self, progress: Progress) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(progress);
    }
}

/// Emits events that never move backwards and never pass `total`.
pub struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    current: u32,
    total: u32,
}

impl<'a> ProgressTracker<'a> {
    /// Create a tracker for `total` steps.
    pub fn new(sink: &'a dyn ProgressSink, total: u32) -> Self {
        Self {
            sink,
            current: 0,
            total,
        }
    }

    /// Current step count.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Report the start of a step without advancing.
    pub fn begin(&self, label: &str) {
        self.emit(label);
    }

    /// Advance by one step and report it.
    pub fn advance(&mut self, label: &str) {
        self.current = (self.current + 1).min(self.total);
        self.emit(label);
    }

    /// Jump to the last step.
    pub fn finish(&mut self, label: &str) {
        self.current = self.total;
        self.emit(label);
    }

    fn emit(&self, label: &str) {
        log::debug!("[{}/{}] {}", self.current, self.total, label);
        self.sink.report(Progress {
            current: self.current,
            total: self.total,
            label: label.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_tracker_is_monotonic_and_bounded() {
        let seen = RefCell::new(Vec::new());
        let sink = |p: Progress| seen.borrow_mut().push(p.current);
        let mut tracker = ProgressTracker::new(&sink, 3);
        tracker.begin("start");
        for _ in 0..5 {
            tracker.advance("step");
        }
        tracker.finish("done");

        let seen = seen.into_inner();
        assert_eq!(seen, vec![0, 1, 2, 3, 3, 3, 3]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_channel_sink() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut tracker = ProgressTracker::new(&tx, 2);
        tracker.advance("parse");
        tracker.finish("write");

        let events: Vec<Progress> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].label, "parse");
        assert!(events[1].is_done());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = crossbeam_channel::unbounded::<Progress>();
        drop(rx);
        let mut tracker = ProgressTracker::new(&tx, 1);
        tracker.advance("orphan");
        assert_eq!(tracker.current(), 1);
    }

    #[test]
    fn test_fraction() {
        let p = Progress {
            current: 1,
            total: 4,
            label: String::new(),
        };
        assert!((p.fraction() - 0.25).abs() < f64::EPSILON);
        let empty = Progress {
            current: 0,
            total: 0,
            label: String::new(),
        };
        assert_eq!(empty.fraction(), 1.0);
        NoProgress.report(empty);
    }
}
