//! Error types for report rendering.

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The dataset could not be classified, so nothing was rendered.
    #[error(transparent)]
    Classification(#[from] PipelineError),

    /// The PDF library failed while building the document.
    #[error("Failed to build PDF document: {0}")]
    Pdf(String),

    /// The finished document could not be written to disk.
    #[error("Failed to write report {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<printpdf::Error> for RenderError {
    fn from(err: printpdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl RenderError {
    /// Short label for the failure kind, used in user-facing notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::Classification(inner) => inner.kind(),
            RenderError::Pdf(_) | RenderError::Io { .. } => "RenderError",
        }
    }
}
