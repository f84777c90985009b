mod assembler;
mod insights;
pub mod rules;
pub mod views;

pub use assembler::{build, ReportAssembler, ReportError};
pub use views::{Insight, MonthlyBreakdownEntry, Report, ReportSummary};
