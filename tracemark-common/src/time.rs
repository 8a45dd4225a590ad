//! Clock abstraction for event and export stamping
//!
//! Timeline add operations stamp events with "today" and default export
//! filenames with a second-resolution timestamp. Both go through
//! [`Clock`] so tests can pin dates instead of depending on wall-clock
//! time.

use std::sync::Arc;

use chrono::Local;

/// Shared clock handle; one clock serves the registry and every
/// timeline it creates.
pub type SharedClock = Arc<dyn Clock>;

/// Source of the current date and of export filename timestamps.
pub trait Clock: Send + Sync {
    /// Current calendar date as `YYYY-MM-DD`.
    fn today(&self) -> String;

    /// Current instant as `YYYYMMDD_HHMMSS`, used in default export
    /// filenames.
    fn export_stamp(&self) -> String;
}

/// Wall-clock implementation in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    fn export_stamp(&self) -> String {
        Local::now().format("%Y%m%d_%H%M%S").to_string()
    }
}

/// Pinned clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: String,
    stamp: String,
}

impl FixedClock {
    pub fn new(today: impl Into<String>, stamp: impl Into<String>) -> Self {
        Self {
            today: today.into(),
            stamp: stamp.into(),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.today.clone()
    }

    fn export_stamp(&self) -> String {
        self.stamp.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_date_shape() {
        let today = SystemClock.today();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
    }

    #[test]
    fn test_system_clock_stamp_shape() {
        let stamp = SystemClock.export_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
    }

    #[test]
    fn test_fixed_clock_returns_pinned_values() {
        let clock = FixedClock::new("2024-03-15", "20240315_120000");
        assert_eq!(clock.today(), "2024-03-15");
        assert_eq!(clock.export_stamp(), "20240315_120000");
    }
}
