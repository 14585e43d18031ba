//! Derived views, exports and report formatting for batch predictions
//!
//! Everything here is a pure function of batch stats and detailed results:
//!
//! - **Views** - attack distribution, traffic split, confidence histogram,
//!   time series chunks
//! - **Severity** - wording for single-sample classifications
//! - **Export** - the downloadable summary CSV
//! - **Reports** - console and JSON rendering via [`ReportFormatter`]

pub mod export;
pub mod reports;
pub mod severity;
pub mod views;

pub use export::{build_export, CsvExport};
pub use reports::{BatchReport, OutputFormat, ReportFormatter};
pub use severity::{confidence_label, severity_for, Severity};
pub use views::{
    attack_color, attack_distribution, confidence_histogram, time_series, traffic_split,
};
