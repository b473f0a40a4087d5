//! Tests for CLI argument parsing

use attendance_report::cli::Cli;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["attendance-report", "-i", "attendance.csv"]);

    assert_eq!(cli.threshold, 75.0, "Default threshold should be 75");
    assert_eq!(cli.class_name, "Class");
    assert_eq!(cli.class_teacher, "Teacher");
    assert_eq!(cli.smtp_host, "smtp.gmail.com");
    assert_eq!(cli.smtp_port, 587);
    assert!(!cli.no_send);
    assert!(!cli.no_confirm);
    assert_eq!(cli.infer_schema_length, 10000);
    assert_eq!(cli.output_dir(), PathBuf::new());
}

#[test]
fn test_cli_full_arguments() {
    let cli = Cli::parse_from([
        "attendance-report",
        "-i",
        "data/attendance.csv",
        "--sender",
        "teacher@school.edu",
        "--receiver",
        "hod@school.edu",
        "--threshold",
        "80",
        "--class-name",
        "10B",
        "-o",
        "reports",
        "--no-confirm",
    ]);

    assert_eq!(cli.input, Some(PathBuf::from("data/attendance.csv")));
    assert_eq!(cli.sender.as_deref(), Some("teacher@school.edu"));
    assert_eq!(cli.receiver.as_deref(), Some("hod@school.edu"));
    assert_eq!(cli.threshold, 80.0);
    assert_eq!(cli.class_name, "10B");
    assert_eq!(cli.output_dir(), PathBuf::from("reports"));
    assert!(cli.no_confirm);
}

#[test]
fn test_cli_threshold_out_of_range() {
    let result = Cli::try_parse_from(["attendance-report", "--threshold", "120"]);

    assert!(result.is_err(), "Threshold above 100 should be rejected");
}

#[test]
fn test_cli_threshold_not_a_number() {
    let result = Cli::try_parse_from(["attendance-report", "--threshold", "high"]);

    assert!(result.is_err());
}

#[test]
fn test_cli_has_no_password_flag() {
    let result = Cli::try_parse_from(["attendance-report", "--password", "secret"]);

    assert!(result.is_err(), "Passwords must not be accepted on the command line");
}

#[test]
fn test_cli_input_is_optional() {
    let cli = Cli::parse_from(["attendance-report", "--no-send"]);

    assert!(cli.input.is_none());
    assert!(cli.no_send);
}
