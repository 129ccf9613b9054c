//! Markdown rendering for analysis reports, snapshot deltas, and cohort
//! comparisons.
//!
//! Renderers never describe a surface as missing data. Every section is
//! rendered from its inference, which always carries a narrative.

pub mod analysis;
pub mod cohort;
pub mod delta;

pub use analysis::{company_display_name, render_report, ReportTone, DEFAULT_FOCUS};
pub use cohort::generate_cohort_report;
pub use delta::delta_to_markdown;

/// Phrases a rendered report must never contain (compared case-insensitively).
pub const FORBIDDEN_PHRASES: [&str; 2] = ["not available", "no data found"];

/// Timestamp format used in every rendered report.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";
