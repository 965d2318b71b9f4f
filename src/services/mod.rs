//! External effects module
//! 
//! This module contains the OS integrations the timer triggers but does not
//! implement itself, such as desktop notifications.

pub mod notifier;

// Re-export main functions
pub use notifier::*;
