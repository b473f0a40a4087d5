//! Email composition - HTML body plus the report as a binary attachment

use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use super::error::DispatchError;

pub const SUBJECT: &str = "Attendance Report";

pub const HTML_BODY: &str = r#"<html>
    <body>
        <h1 style="color: #2C3E50;">Attendance Report</h1>
        <p>Please find attached the attendance report.</p>
    </body>
</html>
"#;

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Build the report email from `sender` to `receiver` with `pdf_path` attached.
///
/// The attachment is named after the file's own name and base64-encoded by
/// the message builder.
pub fn compose(sender: &str, receiver: &str, pdf_path: &Path) -> Result<Message, DispatchError> {
    let bytes = std::fs::read(pdf_path).map_err(|source| DispatchError::Attachment {
        path: pdf_path.to_path_buf(),
        source,
    })?;

    let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
        .map_err(|_| DispatchError::ContentType(ATTACHMENT_CONTENT_TYPE.to_string()))?;

    let attachment = Attachment::new(attachment_name(pdf_path)).body(bytes, content_type);

    let message = Message::builder()
        .from(mailbox(sender)?)
        .to(mailbox(receiver)?)
        .subject(SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::html(HTML_BODY.to_string()))
                .singlepart(attachment),
        )?;

    Ok(message)
}

/// File name used in the attachment's `Content-Disposition` header.
pub fn attachment_name(pdf_path: &Path) -> String {
    pdf_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_path.display().to_string())
}

fn mailbox(address: &str) -> Result<Mailbox, DispatchError> {
    address
        .trim()
        .parse()
        .map_err(|source| DispatchError::Address {
            address: address.to_string(),
            source,
        })
}
