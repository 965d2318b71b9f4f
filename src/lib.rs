//! Focus Loop - a headless Pomodoro timer
//! 
//! This library provides the Pomodoro session state machine, the timer
//! manager that drives it from wall-clock time, and a small HTTP control API
//! through which a menubar front-end can start, pause, skip and reset it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Session, TimerManager, TimerPhase, TimerSettings};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
