//! `PhaseOutputObserver<W>` — bridges `PhaseObserver` to an `OutputWriter`.

use slp_network::Network;
use slp_sim::{PhaseLog, PhaseObserver, RunOutcome};

use crate::row::{HopRow, PhaseSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`PhaseObserver`] that writes hop rows and phase summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `PhaseObserver`
/// methods have no return value.  After `sim.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct PhaseOutputObserver<W: OutputWriter> {
    writer:     W,
    hop_rows:   usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> PhaseOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, hop_rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Hop rows written so far.
    pub fn hop_rows(&self) -> usize {
        self.hop_rows
    }

    /// Flush the writer explicitly; needed after `Sim::run_phases`, which
    /// does not fire `on_run_end`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> PhaseObserver for PhaseOutputObserver<W> {
    fn on_phase_end(&mut self, log: &PhaseLog, _network: &Network) {
        let rows = HopRow::from_log(log);
        if !rows.is_empty() {
            self.hop_rows += rows.len();
            let result = self.writer.write_hops(&rows);
            self.store_err(result);
        }
        let result = self.writer.write_phase_summary(&PhaseSummaryRow::from(log));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _outcome: &RunOutcome, _network: &Network) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
