//! Main application state shared with the HTTP layer and background tasks

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{Clock, Preferences, Session, SystemClock, TimerManager};

/// Composition root: the timer manager plus server metadata
pub struct AppState {
    /// The single owner of the Pomodoro session
    pub manager: TimerManager,
    /// Preferences the manager was built with
    pub preferences: Preferences,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState driven by the system clock
    pub fn new(port: u16, host: String, preferences: Preferences) -> Self {
        Self::with_clock(port, host, preferences, Arc::new(SystemClock))
    }

    pub fn with_clock(port: u16, host: String, preferences: Preferences, clock: Arc<dyn Clock>) -> Self {
        let manager = TimerManager::with_clock(Arc::new(preferences.clone()), clock);

        Self {
            manager,
            preferences,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply a timer command, record it as the last action and return the
    /// resulting session
    pub fn run_command<F>(&self, action: &str, command: F) -> Session
    where
        F: FnOnce(&TimerManager),
    {
        info!("Command received: {}", action);
        command(&self.manager);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.manager.current_session()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
