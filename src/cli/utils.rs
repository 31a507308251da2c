use serde::Serialize;

use crate::cli::OutputFormat;
use crate::database::User;

/// Print a response envelope: pretty JSON, or the given text lines.
pub fn output_envelope<T: Serialize>(
    output_format: OutputFormat,
    envelope: &T,
    text: impl FnOnce(),
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(envelope)?),
        OutputFormat::Text => text(),
    }
    Ok(())
}

/// One line per user for text output. Passwords are not shown.
pub fn format_user(user: &User) -> String {
    format!("{:>4}  {:<20} {}", user.id, user.user_name, user.email)
}

/// Turn a non-2xx reply into an error carrying the envelope's status and reason.
pub fn ensure_success(status: reqwest::StatusCode, status_text: &str, reason: &str) -> anyhow::Result<()> {
    if status.is_success() {
        return Ok(());
    }
    if reason.is_empty() {
        anyhow::bail!("{} ({})", status_text, status)
    }
    anyhow::bail!("{}: {} ({})", status_text, reason, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn formats_user_without_password() {
        let mut user = User::new("Alfie", "alfie@some_office.org", "passwrd1");
        user.id = 3;
        let line = format_user(&user);
        assert!(line.contains("Alfie"));
        assert!(line.contains("alfie@some_office.org"));
        assert!(!line.contains("passwrd1"));
    }

    #[test]
    fn non_success_becomes_error() {
        assert!(ensure_success(StatusCode::CREATED, "Success", "").is_ok());
        let err = ensure_success(StatusCode::NOT_FOUND, "User not found", "no such user").unwrap_err();
        assert_eq!(err.to_string(), "User not found: no such user (404 Not Found)");
    }
}
