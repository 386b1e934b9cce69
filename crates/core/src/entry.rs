//! Mailing-list entry record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A single mailing-list entry, keyed by email address.
///
/// Field names follow the wire format (`Id`, `Email`, `ConfirmedAt`, `OptOut`).
/// Lowercase spellings are accepted on input, and every field falls back to its
/// zero value when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailEntry {
    /// Store-assigned identifier; `0` until the entry has been persisted.
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,

    #[serde(rename = "Email", alias = "email")]
    pub email: String,

    /// When the subscriber confirmed the address, if ever.
    #[serde(rename = "ConfirmedAt", alias = "confirmed_at", alias = "confirmedAt")]
    pub confirmed_at: Option<DateTime<Utc>>,

    #[serde(rename = "OptOut", alias = "opt_out", alias = "optOut")]
    pub opt_out: bool,
}

impl EmailEntry {
    /// A fresh, unconfirmed subscription for `email`.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Reject blank keys before they reach a backend.
pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() {
        return Err(DomainError::MissingEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let entry = EmailEntry::new("a@b.com");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "Id": 0,
                "Email": "a@b.com",
                "ConfirmedAt": null,
                "OptOut": false,
            })
        );
    }

    #[test]
    fn missing_fields_decode_to_zero_values() {
        let entry: EmailEntry = serde_json::from_str(r#"{"Email":"x@y.z"}"#).unwrap();
        assert_eq!(entry, EmailEntry::new("x@y.z"));

        let empty: EmailEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, EmailEntry::default());
    }

    #[test]
    fn accepts_lowercase_field_names() {
        let entry: EmailEntry =
            serde_json::from_str(r#"{"email":"x@y.z","opt_out":true}"#).unwrap();
        assert_eq!(entry.email, "x@y.z");
        assert!(entry.opt_out);
    }

    #[test]
    fn confirmed_at_decodes_from_rfc3339() {
        let entry: EmailEntry = serde_json::from_str(
            r#"{"Email":"x@y.z","ConfirmedAt":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        let at = entry.confirmed_at.unwrap();
        assert_eq!(at.timestamp(), 1_704_164_645);
    }

    #[test]
    fn blank_email_is_rejected() {
        assert_eq!(validate_email(""), Err(DomainError::MissingEmail));
        assert_eq!(validate_email("   "), Err(DomainError::MissingEmail));
        assert!(validate_email("a@b.com").is_ok());
    }
}
