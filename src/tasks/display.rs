//! Menubar title refresh background task

use std::path::PathBuf;
use tokio::sync::watch::Receiver;
use tracing::{debug, info, warn};

use crate::state::Session;

/// Background task that refreshes the menubar title after every session change.
///
/// The title is logged and, when `title_file` is set, written to that file so
/// a status bar can display it.
pub async fn display_refresh_task(mut sessions: Receiver<Session>, title_file: Option<PathBuf>) {
    info!("Starting display refresh task");

    let mut last_title: Option<String> = None;
    loop {
        let title = sessions.borrow_and_update().menubar_title();
        if last_title.as_deref() != Some(title.as_str()) {
            debug!("Menubar title: {}", title);
            if let Some(path) = &title_file {
                if let Err(e) = tokio::fs::write(path, format!("{}\n", title)).await {
                    warn!("Failed to write title to {}: {}", path.display(), e);
                }
            }
            last_title = Some(title);
        }

        if sessions.changed().await.is_err() {
            debug!("Session channel closed, display refresh task stopping");
            break;
        }
    }
}
