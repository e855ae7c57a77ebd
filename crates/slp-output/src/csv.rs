//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `transmission_logs.csv`
//! - `phase_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{format_candidates, format_energy, format_id_list};
use crate::writer::OutputWriter;
use crate::{HopRow, OutputResult, PhaseSummaryRow};

pub const HOP_HEADER: [&str; 9] = [
    "phase",
    "hop",
    "node",
    "energy",
    "valid_neighbors",
    "path",
    "hunter_position",
    "hunter_trail",
    "source_captured",
];

pub const SUMMARY_HEADER: [&str; 8] = [
    "phase",
    "source",
    "source_energy",
    "path_length",
    "delivered",
    "hunter_before",
    "hunter_after",
    "source_captured",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    hops:      Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut hops = Writer::from_path(dir.join("transmission_logs.csv"))?;
        hops.write_record(HOP_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("phase_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            hops,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_hops(&mut self, rows: &[HopRow]) -> OutputResult<()> {
        for row in rows {
            self.hops.write_record(&[
                row.phase.to_string(),
                row.hop.to_string(),
                row.node.to_string(),
                format_energy(row.energy),
                format_candidates(&row.valid_neighbors),
                format_id_list(&row.path),
                row.hunter_position.to_string(),
                format_id_list(&row.hunter_trail),
                row.source_captured.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_phase_summary(&mut self, row: &PhaseSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.phase.to_string(),
            row.source.to_string(),
            format_energy(row.source_energy),
            row.path_length.to_string(),
            row.delivered.to_string(),
            row.hunter_before.to_string(),
            row.hunter_after.to_string(),
            row.source_captured.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.hops.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
