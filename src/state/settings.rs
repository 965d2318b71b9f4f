//! Timer settings contract and the default preferences implementation

use serde::{Deserialize, Serialize};

/// Read-only source of the configurable durations and long-break threshold
pub trait TimerSettings: Send + Sync {
    fn focus_duration_in_seconds(&self) -> f64;
    fn short_break_duration_in_seconds(&self) -> f64;
    fn long_break_duration_in_seconds(&self) -> f64;
    /// Completed focus phases that earn a long break
    fn sessions_before_long_break(&self) -> u32;

    /// Whether phase completions should produce a desktop notification
    fn notifications_enabled(&self) -> bool {
        true
    }
}

/// User preferences for the Pomodoro cycle, stored in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub focus_minutes: u64,
    pub short_break_minutes: u64,
    pub long_break_minutes: u64,
    pub sessions_before_long_break: u32,
    pub notifications_enabled: bool,
}

impl Preferences {
    /// Create preferences from explicit minute values
    pub fn new(focus: u64, short_break: u64, long_break: u64, sessions_before_long_break: u32) -> Self {
        Self {
            focus_minutes: focus,
            short_break_minutes: short_break,
            long_break_minutes: long_break,
            sessions_before_long_break,
            notifications_enabled: true,
        }
    }

    /// Turn phase-completion notifications on or off
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(25, 5, 15, 4)
    }
}

impl TimerSettings for Preferences {
    fn focus_duration_in_seconds(&self) -> f64 {
        self.focus_minutes.saturating_mul(60) as f64
    }

    fn short_break_duration_in_seconds(&self) -> f64 {
        self.short_break_minutes.saturating_mul(60) as f64
    }

    fn long_break_duration_in_seconds(&self) -> f64 {
        self.long_break_minutes.saturating_mul(60) as f64
    }

    fn sessions_before_long_break(&self) -> u32 {
        self.sessions_before_long_break
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_classic_cycle() {
        let prefs = Preferences::default();
        assert_eq!(prefs.focus_duration_in_seconds(), 1500.0);
        assert_eq!(prefs.short_break_duration_in_seconds(), 300.0);
        assert_eq!(prefs.long_break_duration_in_seconds(), 900.0);
        assert_eq!(prefs.sessions_before_long_break(), 4);
        assert!(prefs.notifications_enabled());
    }

    #[test]
    fn huge_minute_values_saturate() {
        let prefs = Preferences::new(u64::MAX, u64::MAX / 2, 10_000_000_000_000, 4);
        assert_eq!(prefs.focus_duration_in_seconds(), u64::MAX as f64);
        assert_eq!(prefs.short_break_duration_in_seconds(), u64::MAX as f64);
        assert_eq!(prefs.long_break_duration_in_seconds(), 600_000_000_000_000.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"focusMinutes": 50}"#).unwrap();
        assert_eq!(prefs.focus_minutes, 50);
        assert_eq!(prefs.short_break_minutes, 5);
        assert_eq!(prefs.sessions_before_long_break, 4);
    }
}
