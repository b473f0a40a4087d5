//! Attendance Report library
//!
//! Classifies students against an attendance threshold, renders a one-page
//! PDF of summary charts and emails it over SMTP. Each stage returns an
//! explicit error; presenting failures is left to the caller.

pub mod cli;
pub mod dispatch;
pub mod pipeline;
pub mod report;
pub mod utils;
