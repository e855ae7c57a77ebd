//! The `OutputWriter` trait implemented by backend writers.

use crate::{HopRow, OutputResult, PhaseSummaryRow};

/// Trait implemented by tabular output backends.
///
/// Errors are returned to the caller; [`PhaseOutputObserver`] stores them
/// for retrieval with [`take_error`].
///
/// [`PhaseOutputObserver`]: crate::PhaseOutputObserver
/// [`take_error`]: crate::PhaseOutputObserver::take_error
pub trait OutputWriter {
    /// Write the hop rows of one phase.
    fn write_hops(&mut self, rows: &[HopRow]) -> OutputResult<()>;

    /// Write one phase summary row.
    fn write_phase_summary(&mut self, row: &PhaseSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
