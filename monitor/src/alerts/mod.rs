//! Alert rendering: report layout, chunking for transport limits, and the
//! message value handed to notification sinks.

pub mod chunking;
pub mod message;
pub mod report;

pub use chunking::split_message;
pub use message::{AlertMessage, MessageControl};
pub use report::{AlertFormatter, HealthReport, ReportSection};
