//! CSV result logs.
//!
//! - `overall_results.csv`: one `;`-separated row per (instance, algorithm)
//!   run, appended across invocations.
//! - `<parameter>_experiment.csv`: one `,`-separated row per parameter value
//!   of a GA sweep, rewritten on each sweep.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::evaluation::RunResult;

/// File name of the cumulative results log.
pub const OVERALL_RESULTS_FILE: &str = "overall_results.csv";

/// One row of the cumulative results log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Instance file name.
    #[serde(rename = "File Name")]
    pub file_name: String,
    /// Algorithm display name.
    #[serde(rename = "Algorithm")]
    pub algorithm: String,
    /// Best fitness of the run.
    #[serde(rename = "Best Fitness")]
    pub best: f64,
    /// Worst fitness of the run.
    #[serde(rename = "Worst Fitness")]
    pub worst: f64,
    /// Average fitness of the run.
    #[serde(rename = "Average Fitness")]
    pub average: f64,
}

impl ResultRecord {
    /// Builds a row from a finished run.
    pub fn from_run(
        file_name: impl Into<String>,
        algorithm: impl Into<String>,
        run: &RunResult,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            algorithm: algorithm.into(),
            best: run.best_fitness,
            worst: run.worst_fitness,
            average: run.average_fitness,
        }
    }
}

/// Appending writer for `overall_results.csv`.
///
/// # Examples
///
/// ```no_run
/// use u_cvrp::io::results::{ResultRecord, ResultsLog};
///
/// let log = ResultsLog::new("results").unwrap();
/// log.append(&ResultRecord {
///     file_name: "A-n32-k5.vrp".into(),
///     algorithm: "Random Search".into(),
///     best: 1520.4,
///     worst: 2210.9,
///     average: 1874.2,
/// })
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    /// Creates `dir` if needed and targets `dir/overall_results.csv`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(OVERALL_RESULTS_FILE),
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, writing the header first if the file is new.
    pub fn append(&self, record: &ResultRecord) -> Result<()> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

/// One row of a parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRow {
    /// Parameter value as given on the command line.
    #[serde(rename = "Parameter Value")]
    pub value: String,
    /// Best fitness.
    #[serde(rename = "Best")]
    pub best: f64,
    /// Worst fitness.
    #[serde(rename = "Worst")]
    pub worst: f64,
    /// Average fitness.
    #[serde(rename = "Avg")]
    pub average: f64,
}

/// Writes `dir/<parameter>_experiment.csv`, replacing any previous sweep.
///
/// Returns the path written.
pub fn write_experiment(dir: impl AsRef<Path>, parameter: &str, rows: &[ExperimentRow]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{parameter}_experiment.csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}
