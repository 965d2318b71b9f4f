//! Pomodoro session record and its phase-transition rule

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{TimerPhase, TimerSettings};

/// Mutable record of the current phase, countdown and session counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub state: TimerPhase,
    pub is_running: bool,
    /// Seconds left in the current phase
    pub remaining_time: f64,
    /// Full length of the current phase in seconds
    pub total_duration: f64,
    /// Focus phases completed since the last long break
    pub session_count: u32,
    /// Instant the countdown reaches zero; only set while running
    pub end_date: Option<DateTime<Utc>>,
}

impl Session {
    /// Create an idle, zeroed session
    pub fn new() -> Self {
        Self {
            state: TimerPhase::Idle,
            is_running: false,
            remaining_time: 0.0,
            total_duration: 0.0,
            session_count: 0,
            end_date: None,
        }
    }

    /// Fraction of the current phase already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_duration > 0.0 {
            ((self.total_duration - self.remaining_time) / self.total_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Remaining time as zero-padded `MM:SS`
    pub fn formatted_time(&self) -> String {
        let seconds = self.remaining_time.floor().max(0.0) as u64;
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    /// Text for a menubar item
    pub fn menubar_title(&self) -> String {
        match (self.state, self.is_running) {
            (TimerPhase::Idle, _) => TimerPhase::Idle.label().to_string(),
            (phase, true) => format!("{} {}", phase.label(), self.formatted_time()),
            (phase, false) => format!("{} {} (paused)", phase.label(), self.formatted_time()),
        }
    }

    /// Advance to the next phase of the cycle.
    ///
    /// Leaves `is_running` and `end_date` alone; those belong to the timer
    /// manager.
    pub fn move_to_next_state(&mut self, settings: &dyn TimerSettings) {
        let next = match self.state {
            TimerPhase::Idle => TimerPhase::Focus,
            TimerPhase::Focus => {
                // Count this focus phase before comparing against the threshold.
                if self.session_count + 1 >= settings.sessions_before_long_break() {
                    self.session_count = 0;
                    TimerPhase::LongBreak
                } else {
                    self.session_count += 1;
                    TimerPhase::ShortBreak
                }
            }
            TimerPhase::ShortBreak | TimerPhase::LongBreak => TimerPhase::Focus,
        };

        let duration = Self::duration_for(next, settings);
        self.state = next;
        self.total_duration = duration;
        self.remaining_time = duration;
    }

    /// Configured length of `phase` in seconds
    pub fn duration_for(phase: TimerPhase, settings: &dyn TimerSettings) -> f64 {
        match phase {
            TimerPhase::Idle => TimerPhase::Idle.default_duration(),
            TimerPhase::Focus => settings.focus_duration_in_seconds(),
            TimerPhase::ShortBreak => settings.short_break_duration_in_seconds(),
            TimerPhase::LongBreak => settings.long_break_duration_in_seconds(),
        }
    }

    /// Return to initial conditions, forgetting the session counter
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Anchor the countdown to `now` and mark the session running
    ///
    /// An end time past what the calendar can represent saturates to the
    /// latest representable instant.
    pub fn anchor(&mut self, now: DateTime<Utc>) {
        let millis = (self.remaining_time.max(0.0) * 1000.0).round() as i64;
        let end = Duration::try_milliseconds(millis)
            .and_then(|remaining| now.checked_add_signed(remaining))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.end_date = Some(end);
        self.is_running = true;
    }

    /// Stop the countdown, keeping the remaining time as it was last computed
    pub fn halt(&mut self) {
        self.is_running = false;
        self.end_date = None;
    }

    /// Recompute `remaining_time` for a tick at `now`.
    ///
    /// With an anchor the value is derived from `end_date - now`, so late or
    /// missed ticks never accumulate drift. Without one it falls back to a
    /// one-second decrement.
    pub fn reconcile(&mut self, now: DateTime<Utc>) {
        self.remaining_time = match self.end_date {
            Some(end) => {
                let left = (end - now).num_milliseconds() as f64 / 1000.0;
                left.clamp(0.0, self.total_duration.max(0.0))
            }
            None => (self.remaining_time - 1.0).max(0.0),
        };
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time <= 0.0
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
