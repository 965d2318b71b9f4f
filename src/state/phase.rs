//! Pomodoro phase enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Segment of the focus/break cycle the session is currently in
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerPhase {
    /// Human-readable label shown next to the countdown
    pub fn label(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "Ready",
            TimerPhase::Focus => "Focus",
            TimerPhase::ShortBreak => "Short Break",
            TimerPhase::LongBreak => "Long Break",
        }
    }

    /// Fallback duration in seconds, used before any settings are consulted
    pub fn default_duration(&self) -> f64 {
        match self {
            TimerPhase::Idle => 0.0,
            TimerPhase::Focus => 25.0 * 60.0,
            TimerPhase::ShortBreak => 5.0 * 60.0,
            TimerPhase::LongBreak => 15.0 * 60.0,
        }
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_the_only_zero_length_phase() {
        assert_eq!(TimerPhase::default(), TimerPhase::Idle);
        assert_eq!(TimerPhase::Idle.default_duration(), 0.0);
        for phase in [TimerPhase::Focus, TimerPhase::ShortBreak, TimerPhase::LongBreak] {
            assert!(phase.default_duration() > 0.0, "{phase} should have a duration");
        }
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_string(&TimerPhase::ShortBreak).unwrap();
        assert_eq!(json, "\"shortBreak\"");
        let phase: TimerPhase = serde_json::from_str("\"longBreak\"").unwrap();
        assert_eq!(phase, TimerPhase::LongBreak);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(TimerPhase::LongBreak.to_string(), "Long Break");
    }
}
