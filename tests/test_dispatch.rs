//! Tests for report email composition and the dispatcher's failure boundary

use attendance_report::dispatch::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn formatted(message: &lettre::Message) -> String {
    String::from_utf8_lossy(&message.formatted()).into_owned()
}

#[test]
fn test_compose_attaches_report_by_file_name() {
    let (_temp_dir, pdf_path) = write_temp_file("Attendance_Report_Class.pdf", &["%PDF-1.3 fake"]);

    let message = compose("teacher@school.edu", "hod@school.edu", &pdf_path).unwrap();
    let raw = formatted(&message);

    assert!(raw.contains("Subject: Attendance Report"));
    assert!(raw.contains("Content-Disposition: attachment"));
    assert!(raw.contains("Attendance_Report_Class.pdf"));
    assert!(raw.contains("application/octet-stream"));
    assert!(raw.contains("Content-Type: text/html"));
}

#[test]
fn test_compose_sets_envelope_addresses() {
    let (_temp_dir, pdf_path) = write_temp_file("report.pdf", &["%PDF"]);

    let message = compose("teacher@school.edu", "hod@school.edu", &pdf_path).unwrap();
    let envelope = message.envelope();

    assert_eq!(
        envelope.from().map(|a| a.to_string()),
        Some("teacher@school.edu".to_string())
    );
    assert_eq!(envelope.to().len(), 1);
    assert_eq!(envelope.to()[0].to_string(), "hod@school.edu");
}

#[test]
fn test_compose_rejects_unparseable_address() {
    let (_temp_dir, pdf_path) = write_temp_file("report.pdf", &["%PDF"]);

    let result = compose("not an address", "hod@school.edu", &pdf_path);

    assert!(matches!(result, Err(DispatchError::Address { .. })));
}

#[test]
fn test_send_with_missing_pdf_fails_before_connecting() {
    let settings = SmtpSettings {
        host: "smtp.invalid".to_string(),
        port: 587,
    };

    let result = send_with(
        &settings,
        "teacher@school.edu",
        &Credential::new("secret"),
        "hod@school.edu",
        std::path::Path::new("/nonexistent/Attendance_Report_Class.pdf"),
    );

    match result {
        Err(err) => {
            assert!(matches!(err, DispatchError::Attachment { .. }));
            assert_eq!(err.kind(), "DispatchError");
        }
        Ok(()) => panic!("Sending a missing report must fail"),
    }
}
