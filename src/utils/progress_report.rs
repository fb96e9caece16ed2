//! Progress reporting for long-running indexing runs.
//!
//! Indexing a full export can take a while. The service reports how many
//! bytes of the source it has consumed; the callback may ask to stop.
//!
//! # Examples
//!
//! ```
//! use dict_index::utils::{ProgressState, ProgressReportFn};
//!
//! fn my_reporter(state: &ProgressState) -> bool {
//!     println!("{}: {}%", state.state_id, state.percent());
//!     false // Return true to cancel the indexing run
//! }
//!
//! let mut progress = ProgressState::new("indexing", 1000, 10, Some(my_reporter));
//! for offset in (0..1000).step_by(50) {
//!     if progress.report(offset) {
//!         break;
//!     }
//! }
//! ```

/// Callback invoked at each reporting step. Returning `true` cancels the run.
pub type ProgressReportFn = fn(&ProgressState) -> bool;

/// Tracks how far a run has progressed and when to call the reporter next.
pub struct ProgressState {
    /// Name of the running operation (e.g. "IndexService::index_file")
    pub state_id: String,
    /// Total amount of work, in the unit the caller reports (bytes here)
    pub total: u64,
    /// Last reported position
    pub current: u64,
    /// Number of entries written so far, filled in by the caller
    pub entries: u64,
    step: u64,
    next_report: u64,
    reporter: Option<ProgressReportFn>,
}

impl ProgressState {
    /// Creates a new progress state that reports roughly every
    /// `report_interval_percent` percent of `total`.
    pub fn new(state_id: &str, total: u64, report_interval_percent: u64, reporter: Option<ProgressReportFn>) -> Self {
        let step = (total.saturating_mul(report_interval_percent.min(100)) / 100).max(1);
        Self {
            state_id: state_id.to_string(),
            total,
            current: 0,
            entries: 0,
            step,
            next_report: step,
            reporter,
        }
    }

    /// Percentage of `total` reached at the last report.
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            return 100;
        }
        (self.current.min(self.total) * 100) / self.total
    }

    /// Records the current position and calls the reporter when a step
    /// boundary was crossed or the end was reached.
    ///
    /// Returns `true` if the reporter asked to cancel.
    pub fn report(&mut self, current: u64) -> bool {
        let Some(reporter) = self.reporter else {
            return false;
        };
        if current < self.next_report && current < self.total {
            return false;
        }
        self.current = current;
        while self.next_report <= current {
            self.next_report += self.step;
        }
        reporter(self)
    }

    /// Reports the end of the run unconditionally.
    pub fn finish(&mut self) -> bool {
        let Some(reporter) = self.reporter else {
            return false;
        };
        self.current = self.total;
        reporter(self)
    }
}
