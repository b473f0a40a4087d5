//! Error types for loading and classifying attendance datasets.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while turning a dataset file into a classification.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset path does not point at an existing file.
    #[error("File not found: {}. Please provide a valid file path.", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but holds no columns or no data rows.
    #[error("The file is empty: {}", path.display())]
    EmptyDataset { path: PathBuf },

    /// One or more required columns are absent from the header.
    #[error("The dataset is missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A percentage cell is blank or not a number.
    ///
    /// `row` is zero-based and counts data rows only (the header is not a row).
    #[error("Row {row} has a missing or non-numeric value in column '{column}'")]
    InvalidPercentage { row: usize, column: String },

    /// Any other failure reported by the CSV reader.
    #[error("Failed to read dataset {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

impl PipelineError {
    /// Short label for the failure kind, used in user-facing notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NotFound { .. } => "NotFoundError",
            PipelineError::EmptyDataset { .. } => "EmptyDatasetError",
            PipelineError::Schema { .. } | PipelineError::InvalidPercentage { .. } => {
                "SchemaError"
            }
            PipelineError::Read { .. } => "ReadError",
        }
    }
}
