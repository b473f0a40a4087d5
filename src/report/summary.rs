//! Classification summary shown in the terminal

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::Classification;

/// Build the counts table for a classification.
pub fn summary_table(classification: &Classification) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("📁 Students"),
        Cell::new(classification.total()),
    ]);

    table.add_row(vec![
        Cell::new("🎯 Threshold"),
        Cell::new(format!("{}%", classification.threshold)),
    ]);

    table.add_row(vec![
        Cell::new("⚠️  Defaulters"),
        Cell::new(classification.defaulter_count()).fg(if classification.defaulters.is_empty() {
            Color::White
        } else {
            Color::Red
        }),
    ]);

    table.add_row(vec![
        Cell::new("✅ Non-Defaulters"),
        Cell::new(classification.non_defaulter_count())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);

    let pct = classification.defaulter_pct();
    let color = if pct > 30.0 {
        Color::Red
    } else if pct > 10.0 {
        Color::Yellow
    } else {
        Color::Cyan
    };

    table.add_row(vec![
        Cell::new("📉 Defaulter share"),
        Cell::new(format!("{:.1}%", pct))
            .fg(color)
            .add_attribute(Attribute::Bold),
    ]);

    table
}

/// Print the counts table followed by the defaulter list.
pub fn display_summary(classification: &Classification) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("ATTENDANCE SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    // Indent the table
    for line in summary_table(classification).to_string().lines() {
        println!("    {}", line);
    }

    if classification.defaulters.is_empty() {
        return;
    }

    println!();
    println!(
        "      {} {}:",
        style("Defaulters").yellow(),
        style(format!("({})", classification.defaulter_count())).dim()
    );
    for record in &classification.defaulters {
        println!(
            "        {} {} {}",
            style("•").dim(),
            record.student_mail_id,
            style(format!("({:.1}%)", record.attendance_percentage)).dim()
        );
    }
}
