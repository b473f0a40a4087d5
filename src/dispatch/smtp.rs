//! SMTP delivery over STARTTLS

use std::fmt;
use std::path::Path;

use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};

use super::error::DispatchError;
use super::message::compose;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Environment variable read for the SMTP password.
pub const PASSWORD_ENV_VAR: &str = "ATTENDANCE_SMTP_PASSWORD";

/// Where the report is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
        }
    }
}

/// Sender password. Never printed; `Debug` shows a placeholder.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Send the report through the default endpoint (`smtp.gmail.com:587`).
pub fn send(
    sender_email: &str,
    credential: &Credential,
    receiver_email: &str,
    pdf_path: &Path,
) -> Result<(), DispatchError> {
    send_with(
        &SmtpSettings::default(),
        sender_email,
        credential,
        receiver_email,
        pdf_path,
    )
}

/// Compose the report email and submit it through `settings`.
///
/// The message is composed before any connection is opened, so a missing
/// attachment never touches the network. The transport lives only inside
/// this call and its connection is released on every return path.
pub fn send_with(
    settings: &SmtpSettings,
    sender_email: &str,
    credential: &Credential,
    receiver_email: &str,
    pdf_path: &Path,
) -> Result<(), DispatchError> {
    let message = compose(sender_email, receiver_email, pdf_path)?;

    let transport = SmtpTransport::starttls_relay(&settings.host)?
        .port(settings.port)
        .credentials(Credentials::new(
            sender_email.trim().to_string(),
            credential.expose().to_string(),
        ))
        .build();

    transport.send(&message)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SmtpSettings::default();
        assert_eq!(settings.host, "smtp.gmail.com");
        assert_eq!(settings.port, 587);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("hunter2");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
    }
}
