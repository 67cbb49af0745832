//! Experiment reports.
//!
//! Every experiment produces `results_{R}_{D}.csv` (and optionally `.json`)
//! in the output directory. The CSV has one row per replication, numbered
//! from 1, followed by `Average` and `Std Dev` rows.

use crate::replication::ExperimentResult;
use crate::ReportError;
use forecourt_types::{Metric, Metrics};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

impl ExperimentResult {
    /// Base file name for this experiment, without extension.
    pub fn file_stem(&self) -> String {
        format!("results_{}_{:.0}", self.replications, self.duration.minutes())
    }

    /// Write the CSV table to `writer`.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write!(writer, "Simulation #")?;
        for metric in Metric::COLUMNS {
            write!(writer, ",{}", metric.name())?;
        }
        writeln!(writer)?;

        for (i, row) in self.rows.iter().enumerate() {
            write_row(writer, &(i + 1).to_string(), row)?;
        }
        write_row(writer, "Average", &self.average)?;
        write_row(writer, "Std Dev", &self.std_dev)?;
        Ok(())
    }

    /// Print the Average row in human-readable form.
    pub fn print_summary(&self) {
        println!(
            "\n=== {} replication(s) x {:.0} min ===",
            self.replications,
            self.duration.minutes()
        );
        for metric in Metric::COLUMNS {
            let unit = if metric.is_utilization() { "%" } else { "" };
            println!(
                "  {:<26} {:>10.2}{unit}  (sd {:.2})",
                metric.name(),
                self.average.get(metric),
                self.std_dev.get(metric)
            );
        }
    }
}

fn write_row<W: Write>(writer: &mut W, label: &str, row: &Metrics) -> std::io::Result<()> {
    write!(writer, "{label}")?;
    for metric in Metric::COLUMNS {
        write!(writer, ",{:.2}", row.get(metric))?;
    }
    writeln!(writer)
}

/// Writes experiment reports into a directory.
#[derive(Clone, Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
    json: bool,
}

impl ReportWriter {
    /// Write CSV reports into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            json: false,
        }
    }

    /// Also write a JSON report per experiment.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Write every report for one experiment. Returns the paths written.
    pub fn write(&self, result: &ExperimentResult) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut written = vec![self.write_csv(result)?];
        if self.json {
            written.push(self.write_json(result)?);
        }
        Ok(written)
    }

    /// Write the CSV report.
    pub fn write_csv(&self, result: &ExperimentResult) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(format!("{}.csv", result.file_stem()));
        let io_err = |source: std::io::Error| ReportError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        result.write_csv(&mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        info!(path = %path.display(), rows = result.rows.len(), "Wrote CSV report");
        Ok(path)
    }

    /// Write the JSON report.
    pub fn write_json(&self, result: &ExperimentResult) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(format!("{}.json", result.file_stem()));
        let io_err = |source: std::io::Error| ReportError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.flush().map_err(io_err)?;

        info!(path = %path.display(), "Wrote JSON report");
        Ok(path)
    }
}
