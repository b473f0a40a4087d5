//! Attendance classification - defaulters vs non-defaulters

use std::path::Path;

use super::error::PipelineError;
use super::loader::{load_attendance, AttendanceRecord, AttendanceTable, DEFAULT_INFER_SCHEMA_LENGTH};

/// Attendance percentage below which a student counts as a defaulter.
pub const DEFAULT_THRESHOLD: f64 = 75.0;

/// Result of partitioning a table against a threshold.
///
/// Every record of `table` appears in exactly one of `defaulters` and
/// `non_defaulters`, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub threshold: f64,
    pub defaulters: Vec<AttendanceRecord>,
    pub non_defaulters: Vec<AttendanceRecord>,
    pub table: AttendanceTable,
}

impl Classification {
    pub fn defaulter_count(&self) -> usize {
        self.defaulters.len()
    }

    pub fn non_defaulter_count(&self) -> usize {
        self.non_defaulters.len()
    }

    pub fn total(&self) -> usize {
        self.table.len()
    }

    /// Share of defaulters in percent, 0.0 for an empty table.
    pub fn defaulter_pct(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.defaulter_count() as f64 / self.total() as f64 * 100.0
        }
    }
}

/// A record is a defaulter when its percentage is strictly below the threshold.
pub fn is_defaulter(record: &AttendanceRecord, threshold: f64) -> bool {
    record.attendance_percentage < threshold
}

/// Partition an already loaded table in a single pass.
pub fn classify_table(table: AttendanceTable, threshold: f64) -> Classification {
    let (defaulters, non_defaulters): (Vec<_>, Vec<_>) = table
        .records()
        .iter()
        .cloned()
        .partition(|record| is_defaulter(record, threshold));

    Classification {
        threshold,
        defaulters,
        non_defaulters,
        table,
    }
}

/// Load `dataset_path` and classify its records against `threshold`.
pub fn classify(dataset_path: &Path, threshold: f64) -> Result<Classification, PipelineError> {
    classify_with_schema_length(dataset_path, threshold, DEFAULT_INFER_SCHEMA_LENGTH)
}

/// Like [`classify`], with control over CSV type inference.
pub fn classify_with_schema_length(
    dataset_path: &Path,
    threshold: f64,
    infer_schema_length: usize,
) -> Result<Classification, PipelineError> {
    let table = load_attendance(dataset_path, infer_schema_length)?;
    Ok(classify_table(table, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(percentages: &[f64]) -> AttendanceTable {
        let records = percentages
            .iter()
            .enumerate()
            .map(|(i, &p)| AttendanceRecord::new(format!("s{}@x.com", i), p))
            .collect();
        AttendanceTable::new(records, false)
    }

    #[test]
    fn test_boundary_is_non_defaulter() {
        let result = classify_table(table(&[75.0]), 75.0);
        assert_eq!(result.defaulter_count(), 0);
        assert_eq!(result.non_defaulter_count(), 1);
    }

    #[test]
    fn test_just_below_boundary_is_defaulter() {
        let result = classify_table(table(&[74.99]), 75.0);
        assert_eq!(result.defaulter_count(), 1);
    }

    #[test]
    fn test_preserves_file_order() {
        let result = classify_table(table(&[10.0, 90.0, 20.0, 80.0]), 50.0);
        let ids: Vec<&str> = result
            .defaulters
            .iter()
            .map(|r| r.student_mail_id.as_str())
            .collect();
        assert_eq!(ids, vec!["s0@x.com", "s2@x.com"]);
    }

    #[test]
    fn test_defaulter_pct_empty_table() {
        let result = classify_table(table(&[]), 75.0);
        assert_eq!(result.defaulter_pct(), 0.0);
    }
}
