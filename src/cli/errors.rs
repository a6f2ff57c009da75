//! CLI-specific error formatting for user-facing messages.

use crate::error::{CredflowError, ErrorCategory};

/// Map a [`CredflowError`] to a user-facing message with a hint.
pub fn format_error_help(err: &CredflowError) -> String {
    match err {
        CredflowError::PublishExhausted(failures) => {
            let mut lines = vec!["❌ All endpoints failed:".to_string()];
            lines.extend(failures.iter().map(|failure| format!("  - {failure}")));
            lines.push(
                "Check the API key, base URL, and that the API is enabled on n8n.".to_string(),
            );
            lines.join("\n")
        }
        CredflowError::SchemaUnavailable(failures) => {
            let mut lines = vec!["❌ Could not fetch schema:".to_string()];
            lines.extend(failures.iter().map(|failure| format!("  - {failure}")));
            lines.push(
                "Check URL and API key; both /api/v1/... and /rest/... were tried.".to_string(),
            );
            lines.join("\n")
        }
        CredflowError::Api { message, .. } => format!("❌ Request failed: {message}"),
        CredflowError::Imap(message) => format!("❌ IMAP connection failed: {message}"),
        other => match other.category() {
            ErrorCategory::Configuration => {
                format!("❌ {other}. Check your .env or pass --base-url / --api-key")
            }
            _ => format!("❌ {other}"),
        },
    }
}
