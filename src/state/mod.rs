//! State management module
//! 
//! This module contains the Pomodoro session model, the settings it reads,
//! and the timer manager that owns and mutates it.

pub mod app_state;
pub mod clock;
pub mod phase;
pub mod session;
pub mod settings;
pub mod timer_manager;

// Re-export main types
pub use app_state::AppState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use phase::TimerPhase;
pub use session::Session;
pub use settings::{Preferences, TimerSettings};
pub use timer_manager::{PhaseChange, PhaseChangeReason, TimerManager, TICK_INTERVAL};
