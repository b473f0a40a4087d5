//! Dataset loader for attendance CSV files
//!
//! Reads the file with polars, checks the header for the required columns and
//! converts every row into a typed [`AttendanceRecord`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use polars::prelude::*;

use super::error::PipelineError;

/// Header of the student identifier column.
pub const MAIL_ID_COLUMN: &str = "Student Mail ID";
/// Header of the attendance percentage column (numeric, 0-100).
pub const PERCENTAGE_COLUMN: &str = "Attendance Percentage";
/// Header of the optional gender column.
pub const GENDER_COLUMN: &str = "Gender";

/// Default number of rows polars scans to infer column types.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

/// One row of the attendance dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub student_mail_id: String,
    pub attendance_percentage: f64,
    /// `None` when the dataset has no gender column or the cell is blank.
    pub gender: Option<String>,
}

impl AttendanceRecord {
    pub fn new(student_mail_id: impl Into<String>, attendance_percentage: f64) -> Self {
        Self {
            student_mail_id: student_mail_id.into(),
            attendance_percentage,
            gender: None,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

/// Attendance records in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceTable {
    records: Vec<AttendanceRecord>,
    has_gender_column: bool,
}

impl AttendanceTable {
    pub fn new(records: Vec<AttendanceRecord>, has_gender_column: bool) -> Self {
        Self {
            records,
            has_gender_column,
        }
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source file carried a `Gender` column at all.
    pub fn has_gender_column(&self) -> bool {
        self.has_gender_column
    }
}

/// Load an attendance dataset from a CSV file.
///
/// # Arguments
/// * `path` - Path to the CSV file (header row required)
/// * `infer_schema_length` - Number of rows used for type inference. Use 0 for a full scan.
///
/// # Errors
/// * [`PipelineError::NotFound`] if the path is not an existing file
/// * [`PipelineError::EmptyDataset`] if the file has no columns or no data rows
/// * [`PipelineError::Schema`] if a required column is missing
/// * [`PipelineError::InvalidPercentage`] if a percentage cell is blank or not numeric
pub fn load_attendance(
    path: &Path,
    infer_schema_length: usize,
) -> Result<AttendanceTable, PipelineError> {
    let df = load_dataframe(path, infer_schema_length)?;

    if df.width() == 0 {
        return Err(PipelineError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    check_required_columns(&df)?;

    if df.height() == 0 {
        return Err(PipelineError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    table_from_dataframe(&df, path)
}

/// Read the raw CSV into a DataFrame, mapping reader failures to pipeline errors.
pub fn load_dataframe(path: &Path, infer_schema_length: usize) -> Result<DataFrame, PipelineError> {
    if !path.is_file() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let is_blank = is_blank_file(path).map_err(|e| read_error(path, e.into()))?;
    if is_blank {
        return Err(PipelineError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let overwrite = text_schema_overwrite(path)?;

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .with_dtype_overwrite(Some(Arc::new(overwrite)))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| read_error(path, e))
}

/// True when the file holds nothing but whitespace.
fn is_blank_file(path: &Path) -> std::io::Result<bool> {
    let reader = BufReader::new(File::open(path)?);
    for byte in reader.bytes() {
        if !byte?.is_ascii_whitespace() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Read the known columns present in the header as text.
///
/// Type inference only sees the first rows, so a late decimal percentage or
/// a numeric-looking mail ID would otherwise abort the read. The typed
/// conversion happens afterwards, row by row.
fn text_schema_overwrite(path: &Path) -> Result<Schema, PipelineError> {
    let header = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .and_then(|mut lf| lf.collect_schema())
        .map_err(|e| read_error(path, e))?;

    let mut overwrite = Schema::default();
    for name in [PERCENTAGE_COLUMN, MAIL_ID_COLUMN, GENDER_COLUMN] {
        if header.get(name).is_some() {
            overwrite.with_column(name.into(), DataType::String);
        }
    }
    Ok(overwrite)
}

/// Names of the required columns absent from `df`, in a fixed order.
pub fn missing_required_columns(df: &DataFrame) -> Vec<String> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    [PERCENTAGE_COLUMN, MAIL_ID_COLUMN]
        .iter()
        .filter(|required| !present.iter().any(|p| p == *required))
        .map(|s| s.to_string())
        .collect()
}

fn check_required_columns(df: &DataFrame) -> Result<(), PipelineError> {
    let missing = missing_required_columns(df);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Schema { missing })
    }
}

fn table_from_dataframe(df: &DataFrame, path: &Path) -> Result<AttendanceTable, PipelineError> {
    let to_err = |e: PolarsError| read_error(path, e);

    let percentages = df
        .column(PERCENTAGE_COLUMN)
        .map_err(to_err)?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(to_err)?;
    let percentages = percentages.f64().map_err(to_err)?;

    let mail_ids = df
        .column(MAIL_ID_COLUMN)
        .map_err(to_err)?
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(to_err)?;
    let mail_ids = mail_ids.str().map_err(to_err)?;

    let genders = match df.column(GENDER_COLUMN) {
        Ok(column) => Some(
            column
                .as_materialized_series()
                .cast(&DataType::String)
                .map_err(to_err)?,
        ),
        Err(_) => None,
    };
    let genders = match &genders {
        Some(series) => Some(series.str().map_err(to_err)?),
        None => None,
    };

    let mut records = Vec::with_capacity(df.height());
    for (row, (mail_id, percentage)) in mail_ids.into_iter().zip(percentages.into_iter()).enumerate() {
        let attendance_percentage = match percentage {
            Some(value) if !value.is_nan() => value,
            _ => {
                return Err(PipelineError::InvalidPercentage {
                    row,
                    column: PERCENTAGE_COLUMN.to_string(),
                })
            }
        };

        let gender = genders
            .and_then(|ca| ca.get(row))
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string);

        records.push(AttendanceRecord {
            student_mail_id: mail_id.unwrap_or_default().to_string(),
            attendance_percentage,
            gender,
        });
    }

    Ok(AttendanceTable::new(records, genders.is_some()))
}

fn read_error(path: &Path, source: PolarsError) -> PipelineError {
    match source {
        PolarsError::NoData(_) => PipelineError::EmptyDataset {
            path: PathBuf::from(path),
        },
        source => PipelineError::Read {
            path: PathBuf::from(path),
            source,
        },
    }
}
