/// Per-path progress reporting.
///
/// The scheduler emits one event after each completed path. Events are
/// purely observational: dropping them on the floor changes nothing, which
/// is exactly what [`NullProgress`] does. The engine runs on one thread, so
/// a sink is a plain trait object, not a channel.

use serde::Serialize;

/// One completed path out of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressEvent {
    /// 1-based position of the path just finished.
    pub index: usize,
    /// Total paths in this pass.
    pub total: usize,
    /// `index / total` as a percentage; 100.0 for an empty pass never fires.
    pub percent: f64,
}

impl ProgressEvent {
    pub fn new(index: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            index as f64 / total as f64 * 100.0
        };
        Self {
            index,
            total,
            percent,
        }
    }
}

/// Receives progress events from a scheduler pass.
pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

/// Discards all events.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

/// Logs each event through `tracing` at debug level.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, event: ProgressEvent) {
        tracing::debug!(
            "[{:3}/{:3}: {:5.2}%]",
            event.index,
            event.total,
            event.percent
        );
    }
}
