//! JSON and HTML export
//!
//! Two file views over the same data. JSON writes events in their
//! current in-memory order; HTML sorts first. The asymmetry is
//! long-standing observable behavior and is kept.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::console::{marker, style};
use crate::Result;

use super::{ActivitySummary, EventRecord, Timeline, UNDATED_HEADING};

/// Top-level shape of the JSON export file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineExport {
    pub summary: ActivitySummary,
    pub events: Vec<EventRecord>,
}

const STYLESHEET: &str = include_str!("timeline.css");

impl Timeline {
    /// Write the JSON export; `None` writes the default filename into
    /// the current directory. Returns the path written.
    ///
    /// Events go out in their current order. Callers wanting the
    /// display order must call [`sort_events`](Timeline::sort_events)
    /// themselves first.
    pub fn export_json(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.default_export_name("json")));

        let export = TimelineExport {
            summary: self.activity_summary(),
            events: self.events.iter().map(|e| e.to_record()).collect(),
        };
        fs::write(&path, serde_json::to_string_pretty(&export)?)?;

        info!("timeline JSON written to {}", path.display());
        println!(
            "{} Timeline exported to: {}{}{}",
            marker::INFO,
            style::GREEN,
            path.display(),
            style::RESET
        );
        Ok(path)
    }

    /// Write the HTML export; `None` writes the default filename into
    /// the current directory. Sorts events first so the document runs
    /// most recent first. Returns the path written.
    pub fn export_html(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.default_export_name("html")));

        self.sort_events();
        fs::write(&path, self.render_html())?;

        info!("timeline HTML written to {}", path.display());
        println!(
            "{} HTML timeline exported to: {}{}{}",
            marker::INFO,
            style::GREEN,
            path.display(),
            style::RESET
        );
        Ok(path)
    }

    /// Standalone HTML document over the current event order: summary
    /// block, then one date heading per distinct date with one card
    /// per event.
    pub fn render_html(&self) -> String {
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("    <meta charset=\"UTF-8\">\n");
        page.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        page.push_str(&format!(
            "    <title>Timeline - {}</title>\n",
            escape_html(&self.target)
        ));
        page.push_str("    <style>\n");
        page.push_str(STYLESHEET);
        page.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
        page.push_str(&format!(
            "        <h1>🔍 Digital Footprint Timeline: {}</h1>\n\n",
            escape_html(&self.target)
        ));

        page.push_str("        <div class=\"summary\">\n");
        page.push_str(&format!(
            "            <div class=\"summary-item\"><strong>Total Events:</strong> {}</div>\n",
            self.events.len()
        ));
        page.push_str(&format!(
            "            <div class=\"summary-item\"><strong>Platforms Found:</strong> {}</div>\n",
            self.platforms_found.len()
        ));
        page.push_str("            <div class=\"summary-item\">\n");
        page.push_str("                <strong>Platforms:</strong>\n");
        page.push_str("                <div class=\"platforms-list\">\n");
        for platform in &self.platforms_found {
            page.push_str(&format!(
                "                    <span class=\"platform-tag\">{}</span>\n",
                escape_html(platform)
            ));
        }
        page.push_str("                </div>\n");
        page.push_str("            </div>\n");
        if let (Some(earliest), Some(latest)) = (&self.earliest_activity, &self.latest_activity) {
            page.push_str(&format!(
                "            <div class=\"summary-item\"><strong>Activity Range:</strong> {} to {}</div>\n",
                escape_html(earliest),
                escape_html(latest)
            ));
        }
        page.push_str("        </div>\n\n");

        page.push_str("        <div class=\"timeline\">\n");
        for (date, events) in self.events_by_date() {
            let heading = date.unwrap_or(UNDATED_HEADING);
            page.push_str(&format!(
                "            <div class=\"timeline-date\">{}</div>\n",
                escape_html(heading)
            ));
            for event in events {
                page.push_str("            <div class=\"timeline-event\">\n");
                page.push_str(&format!(
                    "                <span class=\"event-platform {}\">{}</span>\n",
                    escape_html(&event.platform().to_lowercase()),
                    escape_html(&event.platform().to_uppercase())
                ));
                page.push_str(&format!(
                    "                <div class=\"event-details\">{}</div>\n",
                    escape_html(event.details())
                ));
                if let Some(url) = event.url() {
                    page.push_str(&format!(
                        "                <a href=\"{}\" target=\"_blank\" class=\"event-url\">🔗 {}</a>\n",
                        escape_html(url),
                        escape_html(url)
                    ));
                }
                page.push_str("            </div>\n");
            }
        }
        page.push_str("        </div>\n    </div>\n</body>\n</html>");
        page
    }
}

/// Minimal escaping for text and attribute positions.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::{EventKind, Timeline};
    use super::escape_html;
    use crate::time::FixedClock;

    fn timeline() -> Timeline {
        Timeline::with_clock(
            "example.com",
            Arc::new(FixedClock::new("2024-03-15", "20240315_120000")),
        )
    }

    #[test]
    fn test_escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b a="1">&x"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;x"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_html_badge_classes_follow_platform() {
        let mut t = timeline();
        t.add_leak_event("MegaCorp", Some("2021-06-01"));
        t.add_paste_event("abc123", "https://pastebin.com/abc123");
        t.sort_events();

        let html = t.render_html();
        assert!(html.contains(r#"<span class="event-platform leak">LEAK</span>"#));
        assert!(html.contains(r#"<span class="event-platform pastebin">PASTEBIN</span>"#));
    }

    #[test]
    fn test_html_escapes_paste_derived_text() {
        let mut t = timeline();
        t.add_event(
            Some("2024-01-01".to_string()),
            "pastebin",
            EventKind::PasteFound,
            "payload <script>alert(1)</script>",
            None,
        );
        let html = t.render_html();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_html_omits_activity_range_without_dates() {
        let mut t = timeline();
        t.add_event(None, "pastebin", EventKind::PasteFound, "undated", None);
        let html = t.render_html();
        assert!(!html.contains("Activity Range"));
        assert!(html.contains("undated"));
    }
}
