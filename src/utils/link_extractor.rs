//! Link extraction from arbitrary structured payloads.
//!
//! Matching runs against the JSON serialization of a record instead of
//! walking its fields, so documents of any shape are handled and schema
//! drift in the store does not break extraction. The trade-off is that
//! the pattern has to terminate cleanly at JSON string boundaries.

use regex::Regex;
use serde_json::Value;

/// Default pattern for link-service URLs.
///
/// Matches the redirect-router URL shape
/// `https://router-link-<service>-ew.a.run.app/link/v2/<shopid>/...`,
/// stopping at whitespace, quotes and escapes so a match never runs past
/// the end of the JSON string it is embedded in.
pub const DEFAULT_LINK_PATTERN: &str =
    r#"https://router-link-[a-z0-9]+-ew\.a\.run\.app/link/v2/[A-Za-z0-9]+/[^"\\\s]*"#;

/// Scans serialized records for URLs matching a configured pattern.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Builds an extractor from a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`regex::Error`] for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns every non-overlapping match in the serialized form of
    /// `record`, in left-to-right order.
    ///
    /// Duplicates within one record are preserved. A record that contains
    /// no matches yields an empty list; this never fails.
    pub fn extract(&self, record: &Value) -> Vec<String> {
        let text = record.to_string();
        self.pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_LINK_PATTERN).expect("default pattern is valid"),
        }
    }
}
