//! File formats and result logging.
//!
//! - [`tsplib`] — TSPLIB-VRP instance reader and writer
//! - [`results`] — `overall_results.csv` log and GA parameter sweeps
//! - [`scan`] — discovery of `*.vrp` files in a data directory

pub mod results;
pub mod scan;
pub mod tsplib;

pub use results::{ExperimentRow, ResultRecord, ResultsLog};
pub use scan::find_instances;
pub use tsplib::{parse_instance, read_instance};
