//! Core domain types for joblens.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// JobRecord
// ---------------------------------------------------------------------------

/// One row of scraper output. Created once per input URL, mutated
/// field-by-field during extraction, then finalized into the batch.
///
/// A record with `error` set carries no other populated field except `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Source listing URL (identity key).
    pub url: String,
    /// Job title from the first top-level heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Job description with inter-element whitespace collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Skill tags in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    /// Raw budget display text (not parsed to a number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Client display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// Absolute URL of the client's profile page, when linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_profile_url: Option<String>,
    /// Client location text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_location: Option<String>,
    /// Whether a "Payment verified" badge was found.
    #[serde(default)]
    pub payment_verified: bool,
    /// Hire rate percentage (0–100) when parseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_rate_percent: Option<u8>,
    /// Derived trust flag — never set independently of its inputs.
    #[serde(default)]
    pub is_high_trust: bool,
    /// Harvested email addresses, sorted and deduplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    /// Harvested professional-network profile links, sorted and deduplicated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile_links: Vec<String>,
    /// Set when the primary fetch failed; all other fields stay absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobRecord {
    /// A fresh record for `url` with every other field absent.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// The terminal record shape for a failed primary fetch: `{url, error}`.
    pub fn error_stub(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether this record is a failed-fetch stub.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_stub_carries_only_url_and_error() {
        let rec = JobRecord::error_stub("https://example.test/jobs/1", "HTTP 503");
        assert_eq!(rec.url, "https://example.test/jobs/1");
        assert_eq!(rec.error.as_deref(), Some("HTTP 503"));
        assert!(rec.is_error());

        // Everything else must match the blank record
        let blank = JobRecord::new("https://example.test/jobs/1");
        assert_eq!(rec.title, blank.title);
        assert_eq!(rec.skills, blank.skills);
        assert_eq!(rec.payment_verified, blank.payment_verified);
        assert_eq!(rec.emails, blank.emails);
        assert!(!rec.is_high_trust);
    }

    #[test]
    fn record_serialization_skips_absent_fields() {
        let rec = JobRecord::new("https://example.test/jobs/2");
        let json = serde_json::to_string(&rec).expect("serialize");
        assert!(json.contains("\"url\""));
        assert!(!json.contains("\"title\""));
        assert!(!json.contains("\"error\""));

        let parsed: JobRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, rec);
    }
}
