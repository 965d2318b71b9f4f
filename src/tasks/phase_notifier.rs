//! Phase completion notification background task

use std::{future::Future, sync::Arc};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{debug, info, warn};

use crate::{
    services::{notification_text, send_desktop_notification},
    state::{PhaseChange, PhaseChangeReason, TimerSettings},
};

/// Background task that shows a desktop notification whenever a phase runs out
pub async fn phase_notification_task(changes: Receiver<PhaseChange>, settings: Arc<dyn TimerSettings>) {
    info!("Starting phase notification task");

    forward_completions(changes, settings, |summary, body| async move {
        send_desktop_notification(&summary, &body).await
    })
    .await;
}

/// Hand every completed (not skipped) phase to `notify` while notifications
/// are enabled. Returns once the manager is gone.
async fn forward_completions<F, Fut>(
    mut changes: Receiver<PhaseChange>,
    settings: Arc<dyn TimerSettings>,
    mut notify: F,
) where
    F: FnMut(String, String) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    loop {
        match changes.recv().await {
            Ok(change) => {
                if change.reason == PhaseChangeReason::Skipped {
                    debug!("Phase skipped, no notification");
                    continue;
                }
                if !settings.notifications_enabled() {
                    debug!("Notifications disabled, {} -> {} not announced", change.from, change.to);
                    continue;
                }

                let (summary, body) = notification_text(&change);
                if let Err(e) = notify(summary, body).await {
                    warn!("Failed to deliver notification: {}", e);
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Notification task fell behind, {} phase changes dropped", missed);
            }
            Err(RecvError::Closed) => {
                debug!("Phase change channel closed, notification task stopping");
                break;
            }
        }
    }
}
