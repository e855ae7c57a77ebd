//! `slp-output` — simulation output writers for the slp_sim simulator.
//!
//! | Module       | Files created                                              |
//! |--------------|------------------------------------------------------------|
//! | [`csv`]      | `transmission_logs.csv`, `phase_summaries.csv`             |
//! | [`plot`]     | `network_plot.json` (input for an external plotting tool) |
//!
//! CSV output goes through the [`OutputWriter`] trait and is driven by
//! [`PhaseOutputObserver`], which implements `slp_sim::PhaseObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use slp_output::{CsvWriter, PhaseOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = PhaseOutputObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod plot;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PhaseOutputObserver;
pub use plot::{PlotData, write_plot};
pub use row::{HopRow, PhaseSummaryRow};
pub use writer::OutputWriter;
