//! Console rendering

use crate::console::{marker, style};

use super::{EventKind, Timeline, UNDATED_HEADING};

impl Timeline {
    /// Sort, then print the formatted timeline to stdout.
    pub fn display(&mut self) {
        self.sort_events();
        print!("{}", self.render_console());
    }

    /// Formatted console view over the current event order.
    pub fn render_console(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "\n{}{} TIMELINE ANALYZER {}\n",
            style::RED_BG,
            style::BOLD,
            style::RESET
        ));
        out.push_str(&format!(
            "{} Target: {}{}{}{}\n",
            marker::LOG,
            style::ORANGE,
            style::BOLD,
            self.target,
            style::RESET
        ));
        out.push_str(&format!(
            "{} Total Events: {}{}{}{}\n",
            marker::LOG,
            style::GREEN,
            style::BOLD,
            self.events.len(),
            style::RESET
        ));
        out.push_str(&format!(
            "{} Platforms Found: {}{}{}{}\n",
            marker::LOG,
            style::CYAN,
            style::BOLD,
            self.platforms_found.len(),
            style::RESET
        ));

        if let (Some(earliest), Some(latest)) = (&self.earliest_activity, &self.latest_activity) {
            out.push_str(&format!(
                "{} Activity Range: {}{}{} to {}{}{}\n",
                marker::LOG,
                style::YELLOW,
                earliest,
                style::RESET,
                style::YELLOW,
                latest,
                style::RESET
            ));
        }

        let rule = "=".repeat(70);
        out.push_str(&format!("\n{}{}{}\n", style::BOLD, rule, style::RESET));
        out.push_str(&format!(
            "{}CHRONOLOGICAL TIMELINE{}\n",
            style::BOLD,
            style::RESET
        ));
        out.push_str(&format!("{}{}{}\n\n", style::BOLD, rule, style::RESET));

        for (date, events) in self.events_by_date() {
            let heading = date.unwrap_or(UNDATED_HEADING);
            out.push_str(&format!(
                "\n{}{} {} {}\n",
                style::BLUE_BG,
                style::BOLD,
                heading,
                style::RESET
            ));
            for event in events {
                out.push_str(&format!(
                    "  {} [{}{}{}] {}\n",
                    event_icon(event.kind()),
                    platform_color(event.platform()),
                    event.platform().to_uppercase(),
                    style::RESET,
                    event.details()
                ));
                if let Some(url) = event.url() {
                    out.push_str(&format!(
                        "      {}↳ {}{}{}\n",
                        style::GRAY,
                        style::UNDERLINE,
                        url,
                        style::RESET
                    ));
                }
            }
        }

        out.push_str(&format!("\n{}{}{}\n\n", style::BOLD, rule, style::RESET));
        out
    }
}

/// Icon keyed by event kind; unknown kinds render a plain bullet.
fn event_icon(kind: &EventKind) -> String {
    match kind {
        EventKind::ProfileFound => format!("{}✓{}", style::GREEN, style::RESET),
        EventKind::DataBreach => format!("{}⚠{}", style::RED, style::RESET),
        EventKind::PasteFound => format!("{}📋{}", style::YELLOW, style::RESET),
        EventKind::CommitFound => format!("{}⚡{}", style::CYAN, style::RESET),
        EventKind::Other(_) => "•".to_string(),
    }
}

/// Platform label color for the closed set; everything else renders
/// green.
fn platform_color(platform: &str) -> &'static str {
    match platform {
        "leak" => style::RED,
        "pastebin" => style::YELLOW,
        "github" => style::CYAN,
        _ => style::GREEN,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::Timeline;
    use crate::time::FixedClock;

    fn timeline() -> Timeline {
        Timeline::with_clock(
            "example.com",
            Arc::new(FixedClock::new("2024-03-15", "20240315_120000")),
        )
    }

    #[test]
    fn test_render_carries_header_and_sections() {
        let mut t = timeline();
        t.add_leak_event("MegaCorp", Some("2021-06-01"));
        t.add_paste_event("abc123", "https://pastebin.com/abc123");
        t.sort_events();

        let rendered = t.render_console();
        assert!(rendered.contains("TIMELINE ANALYZER"));
        assert!(rendered.contains("example.com"));
        assert!(rendered.contains("CHRONOLOGICAL TIMELINE"));
        assert!(rendered.contains(&"=".repeat(70)));
        assert!(rendered.contains("2021-06-01"));
        assert!(rendered.contains("Mentioned in paste abc123"));
        assert!(rendered.contains("↳"));
        assert!(rendered.contains("https://pastebin.com/abc123"));
    }

    #[test]
    fn test_activity_range_line_needs_both_bounds() {
        let mut t = timeline();
        t.add_event(
            None,
            "pastebin",
            super::super::EventKind::PasteFound,
            "undated only",
            None,
        );
        let rendered = t.render_console();
        assert!(!rendered.contains("Activity Range"));
    }

    #[test]
    fn test_undated_group_renders_first() {
        let mut t = timeline();
        t.add_leak_event("MegaCorp", Some("2021-06-01"));
        t.add_leak_event("NoDateBreach", None);
        t.sort_events();

        let rendered = t.render_console();
        // Skip the header; the activity range line also carries the date.
        let body = &rendered[rendered.find("CHRONOLOGICAL TIMELINE").unwrap()..];
        let undated_at = body.find("undated").expect("undated heading");
        let dated_at = body.find("2021-06-01").expect("dated heading");
        assert!(undated_at < dated_at);
    }

    #[test]
    fn test_unknown_platform_and_kind_fall_back() {
        let mut t = timeline();
        t.add_event(
            Some("2024-01-01".to_string()),
            "forum",
            super::super::EventKind::Other("mention".to_string()),
            "Thread mention",
            None,
        );
        let rendered = t.render_console();
        assert!(rendered.contains("•"));
        assert!(rendered.contains("FORUM"));
    }
}
