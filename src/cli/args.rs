//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::dispatch::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};

/// Attendance Report - classify attendance, render a PDF report and email it.
///
/// The SMTP password is read from ATTENDANCE_SMTP_PASSWORD or prompted for.
#[derive(Parser, Debug)]
#[command(name = "attendance-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Attendance CSV file with 'Student Mail ID' and 'Attendance Percentage' columns.
    /// Prompted for when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Sender email address (also the SMTP login). Prompted for when omitted.
    #[arg(long)]
    pub sender: Option<String>,

    /// Receiver email address. Prompted for when omitted.
    #[arg(long)]
    pub receiver: Option<String>,

    /// Attendance percentage below which a student is a defaulter
    #[arg(long, default_value = "75", value_parser = validate_threshold)]
    pub threshold: f64,

    /// Class name used in the report title and file name
    #[arg(long, default_value = "Class")]
    pub class_name: String,

    /// Class teacher shown under the report title
    #[arg(long, default_value = "Teacher")]
    pub class_teacher: String,

    /// Directory the PDF is written to. Defaults to the working directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// SMTP server host
    #[arg(long, default_value = DEFAULT_SMTP_HOST)]
    pub smtp_host: String,

    /// SMTP server port (STARTTLS)
    #[arg(long, default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    /// Render the report without sending it
    #[arg(long, default_value = "false")]
    pub no_send: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Output directory, empty for the working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_default()
    }
}

/// Validator for the threshold parameter
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=100.0).contains(&value) {
        Err(format!(
            "threshold must be between 0 and 100, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
