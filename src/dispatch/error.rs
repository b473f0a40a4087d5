//! Error types for composing and sending the report email.

use std::path::PathBuf;

use lettre::address::AddressError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The report file could not be read for attaching.
    #[error("Failed to read attachment {}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An address could not be turned into a mailbox.
    #[error("Invalid email address '{address}'")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    /// The MIME content type of a part was rejected.
    #[error("Invalid content type '{0}'")]
    ContentType(String),

    /// The message builder refused the assembled message.
    #[error("Failed to build email message")]
    Message(#[from] lettre::error::Error),

    /// Connecting, upgrading to TLS, authenticating or submitting failed.
    #[error("SMTP delivery failed")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl DispatchError {
    /// Every dispatch failure surfaces under the same kind.
    pub fn kind(&self) -> &'static str {
        "DispatchError"
    }
}
