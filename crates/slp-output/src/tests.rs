//! Integration tests for slp-output.

use slp_core::{EnergyConfig, NodeId, Point, SimConfig};
use slp_network::{GreedyEnergyPolicy, Network, NetworkBuilder};
use slp_sim::{HopRecord, PhaseLog, Sim, SimBuilder};

fn chain_sim() -> Sim<GreedyEnergyPolicy> {
    let mut b = NetworkBuilder::new(EnergyConfig::default(), 10.0, Point::new(0.0, 0.0));
    b.add_node(Point::new(8.0, 0.0), 2.0);
    b.add_node(Point::new(16.0, 0.0), 2.0);
    b.add_node(Point::new(24.0, 0.0), 2.0);
    let network: Network = b.build();
    let config = SimConfig { max_phases: Some(50), ..SimConfig::default() };
    SimBuilder::new(config, GreedyEnergyPolicy).network(network).build().unwrap()
}

fn sample_log() -> PhaseLog {
    PhaseLog {
        phase:           4,
        source:          NodeId(5),
        source_energy:   1.234,
        path:            vec![NodeId(5), NodeId(3), NodeId(0)],
        hops:            vec![
            HopRecord {
                node:       NodeId(5),
                energy:     1.234,
                candidates: vec![(NodeId(3), 1.25), (NodeId(7), 0.9)],
            },
            HopRecord { node: NodeId(3), energy: 1.25, candidates: vec![(NodeId(0), 2.0)] },
        ],
        delivered:       true,
        hunter_before:   NodeId(0),
        hunter_after:    NodeId(3),
        hunter_trail:    vec![NodeId(0), NodeId(3)],
        source_captured: false,
    }
}

// ── Row flattening ────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::row::{format_candidates, format_energy, format_id_list};
    use crate::{HopRow, PhaseSummaryRow};

    #[test]
    fn id_list_format() {
        assert_eq!(format_id_list(&[5, 3, 0]), "[5, 3, 0]");
        assert_eq!(format_id_list(&[7]), "[7]");
        assert_eq!(format_id_list(&[]), "[]");
    }

    #[test]
    fn candidate_format_two_decimals() {
        assert_eq!(format_candidates(&[(3, 1.25), (7, 0.9)]), "[(3, 1.25), (7, 0.90)]");
        assert_eq!(format_candidates(&[]), "[]");
        assert_eq!(format_energy(0.5), "0.50");
        assert_eq!(format_energy(1.999), "2.00");
    }

    #[test]
    fn one_hop_row_per_forwarding_node() {
        let rows = HopRow::from_log(&sample_log());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hop, 1);
        assert_eq!(rows[0].node, 5);
        assert_eq!(rows[0].valid_neighbors, vec![(3, 1.25), (7, 0.9)]);
        assert_eq!(rows[1].hop, 2);
        assert_eq!(rows[1].node, 3);
        for row in &rows {
            assert_eq!(row.phase, 4);
            assert_eq!(row.path, vec![5, 3, 0]);
            assert_eq!(row.hunter_position, 3);
            assert_eq!(row.hunter_trail, vec![0, 3]);
        }
    }

    #[test]
    fn summary_row_from_log() {
        let row = PhaseSummaryRow::from(&sample_log());
        assert_eq!(row.phase, 4);
        assert_eq!(row.source, 5);
        assert_eq!(row.path_length, 3);
        assert!(row.delivered);
        assert_eq!((row.hunter_before, row.hunter_after), (0, 3));
        assert!(!row.source_captured);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::{HopRow, PhaseSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("transmission_logs.csv").exists());
        assert!(dir.path().join("phase_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("transmission_logs.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "phase",
                "hop",
                "node",
                "energy",
                "valid_neighbors",
                "path",
                "hunter_position",
                "hunter_trail",
                "source_captured",
            ]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("phase_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            [
                "phase",
                "source",
                "source_energy",
                "path_length",
                "delivered",
                "hunter_before",
                "hunter_after",
                "source_captured",
            ]
        );
    }

    #[test]
    fn csv_hop_cells() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_hops(&HopRow::from_log(&sample_log())).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("transmission_logs.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][1], "1");
        assert_eq!(&rows[0][2], "5");
        assert_eq!(&rows[0][3], "1.23");
        assert_eq!(&rows[0][4], "[(3, 1.25), (7, 0.90)]");
        assert_eq!(&rows[0][5], "[5, 3, 0]");
        assert_eq!(&rows[0][6], "3");
        assert_eq!(&rows[0][7], "[0, 3]");
        assert_eq!(&rows[0][8], "false");
        assert_eq!(&rows[1][4], "[(0, 2.00)]");
    }

    #[test]
    fn csv_summary_cells() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_phase_summary(&PhaseSummaryRow::from(&sample_log())).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("phase_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let cells: Vec<&str> = rows[0].iter().collect();
        assert_eq!(cells, ["4", "5", "1.23", "3", "true", "0", "3", "false"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_hops_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_hops(&[]).unwrap();
    }

    #[test]
    fn csv_missing_dir_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }

    #[test]
    fn integration_csv() {
        use crate::observer::PhaseOutputObserver;

        let mut sim = chain_sim();
        let dir = tmp();
        let mut obs = PhaseOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let outcome = sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(outcome.phases(), 3);
        // 3 phases × 3 forwarding nodes
        assert_eq!(obs.hop_rows(), 9);

        let mut rdr = csv::Reader::from_path(dir.path().join("transmission_logs.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9);
        assert_eq!(&rows[0][4], "[(2, 2.00)]");
        assert_eq!(&rows[0][7], "[0, 1]");
        assert_eq!(&rows[8][7], "[0, 1, 2, 3]");
        assert_eq!(&rows[8][8], "true");

        let mut rdr = csv::Reader::from_path(dir.path().join("phase_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 3);
        assert_eq!(&summaries[2][6], "3"); // hunter_after
        assert_eq!(&summaries[2][7], "true");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{HopRow, OutputError, OutputResult, OutputWriter, PhaseOutputObserver, PhaseSummaryRow};

    /// Fails every write after the first `ok_calls`.
    #[derive(Default)]
    struct FlakyWriter {
        ok_calls: usize,
        calls:    usize,
        finished: usize,
    }

    impl FlakyWriter {
        fn tick(&mut self) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok_calls {
                Err(OutputError::Io(std::io::Error::other(format!("call {}", self.calls))))
            } else {
                Ok(())
            }
        }
    }

    impl OutputWriter for FlakyWriter {
        fn write_hops(&mut self, _rows: &[HopRow]) -> OutputResult<()> {
            self.tick()
        }
        fn write_phase_summary(&mut self, _row: &PhaseSummaryRow) -> OutputResult<()> {
            self.tick()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn first_error_kept() {
        let mut sim = chain_sim();
        let mut obs = PhaseOutputObserver::new(FlakyWriter { ok_calls: 1, ..Default::default() });
        sim.run(&mut obs);

        let err = obs.take_error().expect("error stored");
        assert_eq!(err.to_string(), "I/O error: call 2");
        assert!(obs.take_error().is_none(), "take_error clears the slot");

        let writer = obs.into_writer();
        // Writes keep going after a failure: 3 phases × (hops + summary).
        assert_eq!(writer.calls, 6);
        assert_eq!(writer.finished, 1);
    }

    #[test]
    fn run_phases_needs_explicit_finish() {
        let mut sim = chain_sim();
        let mut obs = PhaseOutputObserver::new(FlakyWriter { ok_calls: usize::MAX, ..Default::default() });
        sim.run_phases(1, &mut obs);
        obs.finish().unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().finished, 1);
    }
}

// ── Plot ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plot_tests {
    use super::*;
    use crate::plot::{NodeRole, PlotData, write_plot};

    #[test]
    fn roles_and_trail() {
        let mut sim = chain_sim();
        sim.run(&mut slp_sim::NoopObserver);
        let data = PlotData::from_sim(&sim);

        assert_eq!(data.nodes.len(), 4);
        assert_eq!(data.nodes[0].role, NodeRole::Sink);
        assert_eq!(data.nodes[3].role, NodeRole::Source);
        assert_eq!(data.nodes[1].role, NodeRole::Relay);
        assert_eq!((data.sink, data.source), (0, 3));
        assert_eq!(data.phases.len(), 3);
        assert_eq!(data.phases[0].path, vec![3, 2, 1, 0]);
        assert_eq!(data.hunter_trail, vec![0, 1, 2, 3]);
        assert!(data.captured);
    }

    #[test]
    fn json_written() {
        let mut sim = chain_sim();
        sim.run(&mut slp_sim::NoopObserver);
        let dir = tempfile::tempdir().expect("create temp dir");

        let path = write_plot(dir.path(), &PlotData::from_sim(&sim)).unwrap();
        assert_eq!(path, dir.path().join("network_plot.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["source"], 3);
        assert_eq!(json["nodes"][0]["role"], "sink");
        assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(json["captured"], true);
    }

    #[test]
    fn no_phases_not_captured() {
        let sim = chain_sim();
        let data = PlotData::from_sim(&sim);
        assert!(data.phases.is_empty());
        assert!(!data.captured);
        assert_eq!(data.hunter_trail, vec![0]);
    }
}
