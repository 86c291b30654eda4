//! Human-readable presentation of extracted metadata.

pub mod report;

pub use report::{
    ReportStyle, display_metadata, render_report, render_report_to_string, render_report_with,
};
