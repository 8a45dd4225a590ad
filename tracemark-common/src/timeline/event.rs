//! Timeline event model

use serde::{Deserialize, Serialize};

/// Discovery event category.
///
/// Wire form is the snake_case label. Anything unrecognized is carried
/// through [`EventKind::Other`] so renderers fall back to defaults
/// instead of rejecting the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ProfileFound,
    DataBreach,
    PasteFound,
    CommitFound,
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::ProfileFound => "profile_found",
            EventKind::DataBreach => "data_breach",
            EventKind::PasteFound => "paste_found",
            EventKind::CommitFound => "commit_found",
            EventKind::Other(label) => label,
        }
    }
}

impl From<&str> for EventKind {
    fn from(label: &str) -> Self {
        match label {
            "profile_found" => EventKind::ProfileFound,
            "data_breach" => EventKind::DataBreach,
            "paste_found" => EventKind::PasteFound,
            "commit_found" => EventKind::CommitFound,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single discovery fact tied to one platform and one (possibly
/// unknown) date.
///
/// Constructed only through [`Timeline`](super::Timeline)'s add
/// operations; immutable afterwards.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    date: Option<String>,
    platform: String,
    kind: EventKind,
    details: String,
    url: Option<String>,
}

impl TimelineEvent {
    pub(crate) fn new(
        date: Option<String>,
        platform: String,
        kind: EventKind,
        details: String,
        url: Option<String>,
    ) -> Self {
        Self {
            date,
            platform,
            kind,
            details,
            url,
        }
    }

    /// Calendar date as `YYYY-MM-DD`, when known.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Source platform label (free-form, lowercase by convention).
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Serializable record with stable field order.
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            date: self.date.clone(),
            platform: self.platform.clone(),
            event_type: self.kind.as_str().to_string(),
            details: self.details.clone(),
            url: self.url.clone(),
        }
    }
}

/// Wire form of a [`TimelineEvent`]: `date, platform, type, details,
/// url`, shared by the JSON export and (indirectly) the HTML export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: Option<String>,
    pub platform: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub details: String,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_round_trip() {
        for label in ["profile_found", "data_breach", "paste_found", "commit_found"] {
            assert_eq!(EventKind::from(label).as_str(), label);
        }
    }

    #[test]
    fn test_unrecognized_kind_is_carried_through() {
        let kind = EventKind::from("dns_record");
        assert_eq!(kind, EventKind::Other("dns_record".to_string()));
        assert_eq!(kind.as_str(), "dns_record");
    }

    #[test]
    fn test_record_field_names() {
        let event = TimelineEvent::new(
            Some("2024-01-02".to_string()),
            "pastebin".to_string(),
            EventKind::PasteFound,
            "Mentioned in paste abc".to_string(),
            Some("https://pastebin.com/abc".to_string()),
        );
        let value = serde_json::to_value(event.to_record()).unwrap();
        let object = value.as_object().unwrap();
        for key in ["date", "platform", "type", "details", "url"] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
        assert_eq!(object["type"], "paste_found");
    }
}
