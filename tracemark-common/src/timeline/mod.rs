//! Timeline aggregation engine
//!
//! One [`Timeline`] per investigation target: data-source integrations
//! append discovery events through the typed add operations, and a
//! finalize step renders the aggregate as console output plus JSON and
//! HTML export files. [`TimelineRegistry`] is the run-scoped context
//! object holding the single live timeline.

mod display;
mod event;
mod export;

pub use event::{EventKind, EventRecord, TimelineEvent};
pub use export::TimelineExport;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::console::{marker, style};
use crate::time::{SharedClock, SystemClock};
use crate::Result;

/// Sort key stand-in for events without a date. Lexicographically after
/// any real `YYYY-MM-DD`, so undated events outrank every dated one in
/// the descending sort.
const UNDATED_SORT_KEY: &str = "9999-99-99";

/// Heading label for the undated group in rendered output.
const UNDATED_HEADING: &str = "undated";

/// Aggregate statistics over a timeline. Pure snapshot; computing one
/// never mutates or sorts the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub target: String,
    pub total_events: usize,
    pub platforms_count: usize,
    pub platforms: Vec<String>,
    pub earliest_activity: Option<String>,
    pub latest_activity: Option<String>,
}

/// Chronological record of discovery events for one target.
///
/// Accept-and-store: add operations never reject an event, and a date
/// outside `YYYY-MM-DD` still takes part in the lexicographic sort and
/// range comparisons.
pub struct Timeline {
    target: String,
    events: Vec<TimelineEvent>,
    platforms_found: BTreeSet<String>,
    earliest_activity: Option<String>,
    latest_activity: Option<String>,
    clock: SharedClock,
}

impl Timeline {
    /// Timeline stamped by the system clock.
    pub fn new(target: impl Into<String>) -> Self {
        Self::with_clock(target, Arc::new(SystemClock))
    }

    /// Timeline with an explicit clock; tests pin dates here.
    pub fn with_clock(target: impl Into<String>, clock: SharedClock) -> Self {
        Self {
            target: target.into(),
            events: Vec::new(),
            platforms_found: BTreeSet::new(),
            earliest_activity: None,
            latest_activity: None,
            clock,
        }
    }

    /// Subject string being investigated.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Events in current order: append order until
    /// [`sort_events`](Self::sort_events) runs.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Distinct platform labels seen so far.
    pub fn platforms(&self) -> &BTreeSet<String> {
        &self.platforms_found
    }

    /// Lexicographic minimum of all non-empty dates seen, if any.
    pub fn earliest_activity(&self) -> Option<&str> {
        self.earliest_activity.as_deref()
    }

    /// Lexicographic maximum of all non-empty dates seen, if any.
    pub fn latest_activity(&self) -> Option<&str> {
        self.latest_activity.as_deref()
    }

    /// Append an event and fold it into the platform set and the
    /// activity bounds.
    pub fn add_event(
        &mut self,
        date: Option<String>,
        platform: impl Into<String>,
        kind: EventKind,
        details: impl Into<String>,
        url: Option<String>,
    ) {
        let platform = platform.into();
        self.platforms_found.insert(platform.clone());

        // Empty-string dates count as absent everywhere.
        if let Some(date) = date.as_deref().filter(|d| !d.is_empty()) {
            if self
                .earliest_activity
                .as_deref()
                .map_or(true, |earliest| date < earliest)
            {
                self.earliest_activity = Some(date.to_string());
            }
            if self
                .latest_activity
                .as_deref()
                .map_or(true, |latest| date > latest)
            {
                self.latest_activity = Some(date.to_string());
            }
        }

        self.events
            .push(TimelineEvent::new(date, platform, kind, details.into(), url));
    }

    /// Profile discovered on a platform, dated today.
    pub fn add_profile_found(&mut self, platform: &str, url: &str) {
        let date = Some(self.clock.today());
        self.add_event(
            date,
            platform,
            EventKind::ProfileFound,
            format!("Profile discovered on {}", platform),
            Some(url.to_string()),
        );
    }

    /// Appearance in a known data breach, dated with the leak's own
    /// date (historical, possibly unknown).
    pub fn add_leak_event(&mut self, leak_name: &str, leak_date: Option<&str>) {
        self.add_event(
            leak_date.map(str::to_string),
            "leak",
            EventKind::DataBreach,
            format!("Found in {} breach", leak_name),
            None,
        );
    }

    /// Mention in a public paste, dated today.
    pub fn add_paste_event(&mut self, paste_id: &str, paste_url: &str) {
        let date = Some(self.clock.today());
        self.add_event(
            date,
            "pastebin",
            EventKind::PasteFound,
            format!("Mentioned in paste {}", paste_id),
            Some(paste_url.to_string()),
        );
    }

    /// Mention in a public commit, dated today.
    pub fn add_github_event(&mut self, commit_id: &str, commit_url: &str, title: &str) {
        debug!("recording commit event {}", commit_id);
        let date = Some(self.clock.today());
        self.add_event(
            date,
            "github",
            EventKind::CommitFound,
            format!("Found in commit: {}", title),
            Some(commit_url.to_string()),
        );
    }

    /// Stable in-place sort, most recent first. Undated events take the
    /// `9999-99-99` sentinel key and land on top.
    ///
    /// Idempotent; events sharing a date keep their insertion order.
    pub fn sort_events(&mut self) {
        self.events.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
    }

    /// Aggregate statistics over current state.
    pub fn activity_summary(&self) -> ActivitySummary {
        ActivitySummary {
            target: self.target.clone(),
            total_events: self.events.len(),
            platforms_count: self.platforms_found.len(),
            platforms: self.platforms_found.iter().cloned().collect(),
            earliest_activity: self.earliest_activity.clone(),
            latest_activity: self.latest_activity.clone(),
        }
    }

    /// Default export filename: `timeline_<target>_<stamp>.<extension>`.
    pub fn default_export_name(&self, extension: &str) -> String {
        format!(
            "timeline_{}_{}.{}",
            self.target,
            self.clock.export_stamp(),
            extension
        )
    }

    /// Events grouped by exact date, groups ordered most recent first
    /// with the undated group on top. Within a group, events keep the
    /// order they currently hold in `events`.
    fn events_by_date(&self) -> Vec<(Option<&str>, Vec<&TimelineEvent>)> {
        let mut groups: BTreeMap<&str, Vec<&TimelineEvent>> = BTreeMap::new();
        for event in &self.events {
            groups.entry(sort_key(event)).or_default().push(event);
        }
        groups
            .into_iter()
            .rev()
            .map(|(key, events)| {
                let date = (key != UNDATED_SORT_KEY).then_some(key);
                (date, events)
            })
            .collect()
    }
}

fn sort_key(event: &TimelineEvent) -> &str {
    event
        .date()
        .filter(|d| !d.is_empty())
        .unwrap_or(UNDATED_SORT_KEY)
}

/// Paths written by a successful finalize.
#[derive(Debug, Clone)]
pub struct FinalizeReport {
    pub json_path: PathBuf,
    pub html_path: PathBuf,
}

/// Run-scoped holder of the single live [`Timeline`].
///
/// The orchestrator creates one registry per run and hands it to every
/// data-source integration. Requesting a different target discards the
/// current timeline wholesale; nothing is merged or carried over.
///
/// Single-threaded by construction. A concurrent caller must add its
/// own synchronization around the replacement step and event appends.
pub struct TimelineRegistry {
    slot: Option<Timeline>,
    clock: SharedClock,
}

impl Default for TimelineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineRegistry {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: SharedClock) -> Self {
        Self { slot: None, clock }
    }

    /// Timeline for `target`, created fresh when the target changes.
    pub fn timeline_for(&mut self, target: &str) -> &mut Timeline {
        let stale = self.slot.as_ref().map_or(true, |t| t.target() != target);
        if stale {
            self.slot = Some(Timeline::with_clock(target, Arc::clone(&self.clock)));
        }
        self.slot.as_mut().expect("slot populated above")
    }

    /// Current timeline, if one has been requested this run.
    pub fn current(&self) -> Option<&Timeline> {
        self.slot.as_ref()
    }

    /// Display the timeline and write both exports under their default
    /// filenames into `export_dir`. Complete no-op when no events were
    /// ever recorded.
    pub fn finalize(&mut self, export_dir: &Path) -> Result<Option<FinalizeReport>> {
        let Some(timeline) = self.slot.as_mut() else {
            return Ok(None);
        };
        if timeline.events().is_empty() {
            return Ok(None);
        }

        std::fs::create_dir_all(export_dir)?;

        timeline.display();

        let json_name = timeline.default_export_name("json");
        let json_path = timeline.export_json(Some(&export_dir.join(json_name)))?;
        let html_name = timeline.default_export_name("html");
        let html_path = timeline.export_html(Some(&export_dir.join(html_name)))?;

        println!(
            "\n{} {}Timeline analysis complete!{}\n",
            marker::LOG,
            style::GREEN,
            style::RESET
        );

        Ok(Some(FinalizeReport {
            json_path,
            html_path,
        }))
    }
}
