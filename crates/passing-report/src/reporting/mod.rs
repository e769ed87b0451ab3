//! Report output: console lines, the chart and files on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use passing_report::reporting::ReportGenerator;
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.export_plays(&mut plays, "dart_passing_analysis.csv")?;
//! generator.write_report_to_file(&report, "j_dart_2025")?;
//! ```

pub mod chart;
pub mod console;
mod generator;

pub use chart::{build_chart, chart_title, render_chart};
pub use console::{print_summary, summary_lines};
pub use generator::ReportGenerator;
