//! Progress reporting
//!
//! Wraps a caller-supplied callback so the pipeline can report
//! percentages freely: values are clamped to [0, 100] and
//! non-increasing reports are swallowed, so the callback only ever
//! observes a strictly increasing sequence from 0 to 100 within a run.

/// Monotonic percentage reporter over a `FnMut(f64)` callback.
pub struct ProgressReporter<F: FnMut(f64)> {
    callback: F,
    last: f64,
}

impl<F: FnMut(f64)> ProgressReporter<F> {
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            last: -1.0,
        }
    }

    /// Report a percentage checkpoint. Clamped to [0, 100]; values not
    /// above the previous report are dropped.
    pub fn report(&mut self, percent: f64) {
        let clamped = percent.clamp(0.0, 100.0);
        if clamped > self.last {
            self.last = clamped;
            (self.callback)(clamped);
        }
    }

    /// Last percentage actually delivered, if any.
    pub fn last_reported(&self) -> Option<f64> {
        (self.last >= 0.0).then_some(self.last)
    }
}
