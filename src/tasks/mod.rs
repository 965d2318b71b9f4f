//! Background tasks module
//! 
//! This module contains the ticker that drives the countdown and the tasks
//! that react to session changes alongside the HTTP server.

pub mod display;
pub mod phase_notifier;
pub mod ticker;

// Re-export main functions
pub use display::display_refresh_task;
pub use phase_notifier::phase_notification_task;
pub use ticker::spawn_ticker;
