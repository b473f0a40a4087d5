//! Attendance Report CLI Tool
//!
//! Classifies an attendance CSV, writes the PDF report and emails it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use attendance_report::cli::{check_required_fields, confirm_step, resolve_dataset_path, resolve_delivery, Cli};
use attendance_report::dispatch::{send_with, DispatchError, SmtpSettings};
use attendance_report::pipeline::{classify_with_schema_length, PipelineError};
use attendance_report::report::{display_summary, render_classification, RenderError, ReportOptions};
use attendance_report::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_completion,
    print_config, print_error, print_info, print_step_header, print_success,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (kind, message) = describe_failure(&err);
            print_error(kind, &message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Gather every input up front, like the form did before running anything
    let dataset_path = resolve_dataset_path(cli)?;
    let dataset_display = dataset_path.to_string_lossy();
    check_required_fields(&[("Attendance CSV file", dataset_display.as_ref())])?;

    let delivery = if cli.no_send {
        None
    } else {
        Some(resolve_delivery(cli)?)
    };

    let options = ReportOptions {
        class_name: cli.class_name.clone(),
        class_teacher: cli.class_teacher.clone(),
        threshold: cli.threshold,
        output_dir: cli.output_dir(),
        infer_schema_length: cli.infer_schema_length,
    };

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &dataset_path,
        &options.output_path(),
        options.threshold,
        delivery.as_ref().map(|d| d.receiver_email.as_str()),
    );

    // Step 1: Classify
    print_step_header(1, "Classify Attendance");
    let classification =
        classify_with_schema_length(&dataset_path, options.threshold, options.infer_schema_length)?;
    print_success("Dataset classified");
    display_summary(&classification);

    // Step 2: Render
    print_step_header(2, "Render Report");
    let spinner = create_spinner("Drawing charts...");
    let pdf_path = match render_classification(&classification, &options) {
        Ok(path) => path,
        Err(err) => {
            finish_with_failure(&spinner);
            return Err(err.into());
        }
    };
    finish_with_success(&spinner, &format!("Graphs saved to {}", pdf_path.display()));

    let Some(delivery) = delivery else {
        print_completion("Report generated!");
        return Ok(());
    };

    if !cli.no_confirm
        && !confirm_step(&format!("Send report to {}?", delivery.receiver_email))?
    {
        print_info("Report not sent");
        return Ok(());
    }

    // Step 3: Send
    print_step_header(3, "Send Report");
    let settings = SmtpSettings {
        host: cli.smtp_host.clone(),
        port: cli.smtp_port,
    };
    let spinner = create_spinner(&format!(
        "Sending via {}:{}...",
        settings.host, settings.port
    ));
    if let Err(err) = send_with(
        &settings,
        &delivery.sender_email,
        &delivery.credential,
        &delivery.receiver_email,
        &pdf_path,
    ) {
        finish_with_failure(&spinner);
        return Err(err.into());
    }
    finish_with_success(&spinner, "Email sent successfully!");

    print_completion("Report generated and sent!");
    Ok(())
}

/// Kind label and human-readable message for a failed run.
fn describe_failure(err: &anyhow::Error) -> (&'static str, String) {
    if let Some(e) = err.downcast_ref::<PipelineError>() {
        (e.kind(), format!("{:#}", err))
    } else if let Some(e) = err.downcast_ref::<RenderError>() {
        (e.kind(), format!("An error occurred: {:#}", err))
    } else if let Some(e) = err.downcast_ref::<DispatchError>() {
        (e.kind(), format!("Error sending email: {:#}", err))
    } else {
        ("Error", format!("{:#}", err))
    }
}
