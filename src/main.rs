//! Focus Loop - a headless Pomodoro timer
//! 
//! This is the main entry point for the focus-loop daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use focus_loop::{
    api::create_router,
    config::Config,
    services::check_notifier_available,
    state::AppState,
    tasks::{display_refresh_task, phase_notification_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_loop={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-loop v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, short={}min, long={}min, long break every {} sessions",
          config.host, config.port, config.focus, config.short_break, config.long_break,
          config.sessions_before_long_break);

    let mut preferences = config.preferences();
    if preferences.notifications_enabled {
        if let Err(e) = check_notifier_available().await {
            warn!("{}", e);
            preferences.notifications_enabled = false;
        }
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), preferences));

    // Start the background tasks that react to session changes
    tokio::spawn(phase_notification_task(
        state.manager.subscribe_phase_changes(),
        state.manager.settings(),
    ));
    tokio::spawn(display_refresh_task(
        state.manager.subscribe(),
        config.title_file.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the timer");
    info!("  POST /pause  - Pause the timer");
    info!("  POST /skip   - Skip to the next phase");
    info!("  POST /reset  - Reset to idle");
    info!("  GET  /status - Current session and settings");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.manager.reset();
    info!("Server shutdown complete");
    Ok(())
}
