//! Pastebin dump search
//!
//! Queries the psbdmp.cc search API for pastes mentioning the target
//! and records each hit on the run timeline.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use tracemark_common::console::{marker, style};
use tracemark_common::timeline::Timeline;
use tracemark_common::{Error, Result};

use crate::extract;

/// Public paste URL prefix for discovered paste ids.
const PASTE_URL_PREFIX: &str = "https://pastebin.com/";

/// Search endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct PasteSearchResponse {
    pub count: usize,
    #[serde(default)]
    pub data: Vec<PasteEntry>,
}

/// One paste hit: its id and the matching text fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct PasteEntry {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

/// What one pastebin sweep gathered.
#[derive(Debug, Clone, Default)]
pub struct PastebinReport {
    /// Paste id paired with its public paste URL.
    pub links: Vec<(String, String)>,
    /// Paste id paired with the raw matched text fragment.
    pub includes: Vec<(String, String)>,
    /// Phone-number-like strings pulled from the matched text.
    pub phone_numbers: Vec<String>,
}

/// Client for the paste-dump search API.
pub struct PastebinClient {
    http_client: Client,
    base_url: String,
}

impl PastebinClient {
    /// Create a client with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Search paste dumps for `value`, record a paste event per hit,
    /// and print the per-hit result lines plus the finished summary.
    pub async fn search(&self, timeline: &mut Timeline, value: &str) -> Result<PastebinReport> {
        println!(
            "{} Searching {}{}{}{} on {}Pastebin{}...",
            marker::LOG,
            style::BOLD,
            style::ORANGE,
            value,
            style::RESET,
            style::BOLD,
            style::RESET
        );

        let url = format!(
            "{}/api/search/domain/{}",
            self.base_url.trim_end_matches('/'),
            value
        );
        debug!("querying {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("pastebin search request failed: {}", e)))?;
        let body: PasteSearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("pastebin search response decode failed: {}", e)))?;

        if body.count != body.data.len() {
            warn!(
                "search reported {} hits but returned {}",
                body.count,
                body.data.len()
            );
        }

        let (report, out) = gather(timeline, &body.data);

        if !report.links.is_empty() {
            print!("{}", out);
        }
        println!(
            "{} Pastebin search finished! {}{}{} results found for {}{}{}{}.",
            marker::LOG,
            style::RED,
            report.links.len(),
            style::RESET,
            style::BOLD,
            style::ORANGE,
            value,
            style::RESET
        );

        Ok(report)
    }
}

/// Fold search hits into the timeline and build the printable result
/// block. Split from the HTTP path so hit handling stays testable.
fn gather(timeline: &mut Timeline, entries: &[PasteEntry]) -> (PastebinReport, String) {
    let mut report = PastebinReport::default();
    let mut out = format!("{} Pastes found:\n", marker::FOUND);

    for entry in entries {
        let include = collapse_include(&entry.text);

        for number in extract::phone_numbers(&entry.text) {
            if !report.phone_numbers.contains(&number) {
                out.push_str(&format!(
                    "     {} Phone : [{}{}{}]\n",
                    marker::FOUND,
                    style::ORANGE,
                    number,
                    style::RESET
                ));
                report.phone_numbers.push(number);
            }
        }

        let paste_url = format!("{}{}", PASTE_URL_PREFIX, entry.id);
        out.push_str(&format!(
            "     [{}{}{}] {}Paste{} : [{}{}{}{}] {}Include{} : [{}{}{}]\n",
            style::WHITE_BG,
            entry.id,
            style::RESET,
            style::BOLD,
            style::RESET,
            style::RED,
            style::UNDERLINE,
            paste_url,
            style::RESET,
            style::BOLD,
            style::RESET,
            style::ORANGE,
            include,
            style::RESET
        ));
        report.includes.push((entry.id.clone(), entry.text.clone()));
        report.links.push((entry.id.clone(), paste_url.clone()));

        timeline.add_paste_event(&entry.id, &paste_url);
    }

    (report, out)
}

/// Collapse all whitespace out of the matched fragment, the way the
/// search API reports includes.
fn collapse_include(text: &str) -> String {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracemark_common::time::FixedClock;
    use tracemark_common::timeline::{EventKind, Timeline};

    use super::*;

    fn timeline() -> Timeline {
        Timeline::with_clock(
            "example.com",
            Arc::new(FixedClock::new("2024-03-15", "20240315_120000")),
        )
    }

    #[test]
    fn test_response_decodes_wire_shape() {
        let raw = r#"{"count":2,"data":[{"id":"aB3xYz","text":"mail@example.com"},{"id":"q1W2e3","text":"call 555-867-5309"}]}"#;
        let response: PasteSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.data[0].id, "aB3xYz");
        assert_eq!(response.data[1].text, "call 555-867-5309");
    }

    #[test]
    fn test_response_tolerates_missing_data() {
        let response: PasteSearchResponse = serde_json::from_str(r#"{"count":0}"#).unwrap();
        assert_eq!(response.count, 0);
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_gather_records_one_paste_event_per_hit() {
        let mut t = timeline();
        let entries = vec![
            PasteEntry {
                id: "aB3xYz".to_string(),
                text: "mail@example.com".to_string(),
            },
            PasteEntry {
                id: "q1W2e3".to_string(),
                text: "more example.com".to_string(),
            },
        ];

        let (report, _) = gather(&mut t, &entries);

        assert_eq!(t.events().len(), 2);
        for (event, entry) in t.events().iter().zip(&entries) {
            assert_eq!(event.kind(), &EventKind::PasteFound);
            assert_eq!(event.platform(), "pastebin");
            assert_eq!(
                event.url(),
                Some(format!("https://pastebin.com/{}", entry.id).as_str())
            );
            assert_eq!(event.date(), Some("2024-03-15"));
        }
        assert_eq!(report.links.len(), 2);
        assert_eq!(report.links[0].1, "https://pastebin.com/aB3xYz");
    }

    #[test]
    fn test_gather_extracts_phones_across_hits() {
        let mut t = timeline();
        let entries = vec![
            PasteEntry {
                id: "one".to_string(),
                text: "leaked: 555-867-5309".to_string(),
            },
            PasteEntry {
                id: "two".to_string(),
                text: "again 555-867-5309 and +47 22 86 53 00".to_string(),
            },
        ];

        let (report, _) = gather(&mut t, &entries);
        assert_eq!(
            report.phone_numbers,
            vec!["555-867-5309", "+47 22 86 53 00"]
        );
    }

    #[test]
    fn test_gather_with_no_hits_leaves_timeline_empty() {
        let mut t = timeline();
        let (report, _) = gather(&mut t, &[]);
        assert!(t.events().is_empty());
        assert!(report.links.is_empty());
        assert!(report.includes.is_empty());
    }

    #[test]
    fn test_collapse_include_strips_all_whitespace() {
        assert_eq!(
            collapse_include("  user@example.com\n pass\t123 "),
            "user@example.compass123"
        );
    }
}
