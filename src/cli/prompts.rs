//! Interactive prompts using dialoguer
//!
//! Fills in whatever the command line left out: dataset path, sender,
//! receiver and the masked SMTP password.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

use super::args::Cli;
use crate::dispatch::{Credential, PASSWORD_ENV_VAR};

/// Everything needed to email the report.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub sender_email: String,
    pub credential: Credential,
    pub receiver_email: String,
}

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Dataset path from the command line, or asked for when interactive.
pub fn resolve_dataset_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.input {
        return Ok(path.clone());
    }
    if cli.no_confirm {
        anyhow::bail!("Input file is required. Use -i/--input to specify a file.");
    }

    let path: String = Input::new()
        .with_prompt("Attendance CSV file")
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// Sender, receiver and password, prompting for any that are missing.
///
/// The password comes from the environment when set, otherwise from a
/// masked prompt.
pub fn resolve_delivery(cli: &Cli) -> Result<Delivery> {
    let sender_email = match &cli.sender {
        Some(sender) => sender.clone(),
        None => prompt_text(cli, "Sender email", "--sender")?,
    };

    let credential = match std::env::var(PASSWORD_ENV_VAR) {
        Ok(secret) if !secret.is_empty() => Credential::new(secret),
        _ if cli.no_confirm => anyhow::bail!(
            "SMTP password is required. Set {} when using --no-confirm.",
            PASSWORD_ENV_VAR
        ),
        _ => Credential::new(Password::new().with_prompt("App password").interact()?),
    };

    let receiver_email = match &cli.receiver {
        Some(receiver) => receiver.clone(),
        None => prompt_text(cli, "Receiver email", "--receiver")?,
    };

    let delivery = Delivery {
        sender_email,
        credential,
        receiver_email,
    };
    check_required_fields(&[
        ("Sender email", delivery.sender_email.as_str()),
        ("App password", if delivery.credential.is_empty() { "" } else { "set" }),
        ("Receiver email", delivery.receiver_email.as_str()),
    ])?;

    Ok(delivery)
}

/// Fail with the names of all blank fields.
pub fn check_required_fields(fields: &[(&str, &str)]) -> Result<()> {
    let blank: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if blank.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Please fill in all fields. Missing: {}", blank.join(", "))
    }
}

fn prompt_text(cli: &Cli, prompt: &str, flag: &str) -> Result<String> {
    if cli.no_confirm {
        anyhow::bail!("{} is required. Use {} to specify it.", prompt, flag);
    }
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value.trim().to_string())
}
