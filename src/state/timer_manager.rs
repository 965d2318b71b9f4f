//! Timer manager: the single owner and mutator of the Pomodoro session

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{
    runtime::Handle,
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::{Clock, Session, SystemClock, TimerPhase, TimerSettings};
use crate::tasks::spawn_ticker;

/// Wall-clock spacing between countdown recomputations
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Why the session left a phase
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PhaseChangeReason {
    Completed,
    Skipped,
}

/// Published whenever the session advances to a new phase
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChange {
    pub from: TimerPhase,
    pub to: TimerPhase,
    pub session_count: u32,
    pub reason: PhaseChangeReason,
    pub at: DateTime<Utc>,
}

/// Drives the session clock and applies the start/pause/skip/reset commands.
///
/// Cloning is cheap; all clones share one session.
#[derive(Clone)]
pub struct TimerManager {
    shared: Arc<Shared>,
}

struct Shared {
    settings: Arc<dyn TimerSettings>,
    clock: Arc<dyn Clock>,
    /// Runtime the ticker is spawned on; `None` when built outside Tokio
    runtime: Option<Handle>,
    core: Mutex<Core>,
    /// Snapshot published after every mutation
    session_tx: watch::Sender<Session>,
    /// Keep the receiver alive to prevent channel closure
    _session_rx: watch::Receiver<Session>,
    phase_tx: broadcast::Sender<PhaseChange>,
}

struct Core {
    session: Session,
    ticker: Option<JoinHandle<()>>,
    /// Bumped on every cancellation; a tick from an older generation is ignored
    generation: u64,
}

impl TimerManager {
    /// Create a manager reading wall-clock time from the system.
    ///
    /// The ticker runs on the Tokio runtime that is current at construction.
    /// A manager built outside any runtime still applies every command, but
    /// nothing ticks it; see [`TimerManager::with_runtime`].
    pub fn new(settings: Arc<dyn TimerSettings>) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: Arc<dyn TimerSettings>, clock: Arc<dyn Clock>) -> Self {
        Self::build(settings, clock, Handle::try_current().ok())
    }

    /// Create a manager whose ticker is spawned on `runtime`, so commands
    /// may be issued from threads that are not inside a Tokio context
    pub fn with_runtime(settings: Arc<dyn TimerSettings>, clock: Arc<dyn Clock>, runtime: Handle) -> Self {
        Self::build(settings, clock, Some(runtime))
    }

    fn build(settings: Arc<dyn TimerSettings>, clock: Arc<dyn Clock>, runtime: Option<Handle>) -> Self {
        if runtime.is_none() {
            warn!("No Tokio runtime available, the countdown will not tick on its own");
        }

        let session = Session::new();
        let (session_tx, session_rx) = watch::channel(session.clone());
        let (phase_tx, _) = broadcast::channel(32);

        Self {
            shared: Arc::new(Shared {
                settings,
                clock,
                runtime,
                core: Mutex::new(Core {
                    session,
                    ticker: None,
                    generation: 0,
                }),
                session_tx,
                _session_rx: session_rx,
                phase_tx,
            }),
        }
    }

    /// Start or resume the countdown; entering focus first when idle
    pub fn start(&self) {
        let mut core = self.shared.lock();
        if self.shared.start_locked(&mut core) {
            info!(
                "Timer started: {} with {} remaining",
                core.session.state,
                core.session.formatted_time()
            );
            self.shared.publish_locked(&core);
        } else {
            debug!("Start ignored, timer already running");
        }
    }

    /// Stop the countdown, keeping the remaining time
    pub fn pause(&self) {
        let mut core = self.shared.lock();
        if !core.session.is_running {
            debug!("Pause ignored, timer not running");
            return;
        }

        Shared::cancel_ticker_locked(&mut core);
        core.session.halt();
        info!(
            "Timer paused: {} with {} remaining",
            core.session.state,
            core.session.formatted_time()
        );
        self.shared.publish_locked(&core);
    }

    /// Abandon the current phase and run the next one immediately
    pub fn skip(&self) {
        let mut core = self.shared.lock();
        info!("Skipping {}", core.session.state);
        self.shared.advance_locked(&mut core, PhaseChangeReason::Skipped);
        self.shared.publish_locked(&core);
    }

    /// Abandon the whole cycle and return to idle
    pub fn reset(&self) {
        let mut core = self.shared.lock();
        Shared::cancel_ticker_locked(&mut core);
        core.session.reset();
        info!("Timer reset");
        self.shared.publish_locked(&core);
    }

    /// Consistent copy of the session as of the last command or tick
    pub fn current_session(&self) -> Session {
        self.shared.lock().session.clone()
    }

    /// Receive a fresh session snapshot after every mutation
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.shared.session_tx.subscribe()
    }

    /// Receive an event each time the session moves to another phase
    pub fn subscribe_phase_changes(&self) -> broadcast::Receiver<PhaseChange> {
        self.shared.phase_tx.subscribe()
    }

    pub fn settings(&self) -> Arc<dyn TimerSettings> {
        Arc::clone(&self.shared.settings)
    }

    /// Whether a ticker task is currently attached to the session
    #[doc(hidden)]
    pub fn is_ticking(&self) -> bool {
        self.shared.lock().ticker.is_some()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Core> {
        // Every critical section leaves the session consistent, so a poisoned
        // guard still holds a usable value.
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns false when the session was already running
    fn start_locked(self: &Arc<Self>, core: &mut Core) -> bool {
        if core.session.is_running {
            return false;
        }

        if core.session.state == TimerPhase::Idle {
            core.session.move_to_next_state(self.settings.as_ref());
        }

        core.session.anchor(self.clock.now());
        self.spawn_ticker_locked(core);
        true
    }

    fn advance_locked(self: &Arc<Self>, core: &mut Core, reason: PhaseChangeReason) {
        Self::cancel_ticker_locked(core);

        let from = core.session.state;
        core.session.halt();
        core.session.move_to_next_state(self.settings.as_ref());

        let change = PhaseChange {
            from,
            to: core.session.state,
            session_count: core.session.session_count,
            reason,
            at: self.clock.now(),
        };
        info!(
            "Phase {:?}: {} -> {} (completed focus sessions: {})",
            reason, change.from, change.to, change.session_count
        );
        if let Err(e) = self.phase_tx.send(change) {
            debug!("No phase change listeners: {}", e);
        }

        self.start_locked(core);
    }

    fn spawn_ticker_locked(self: &Arc<Self>, core: &mut Core) {
        Self::cancel_ticker_locked(core);

        let Some(runtime) = &self.runtime else {
            debug!("No runtime to tick on, countdown stays at its anchor");
            return;
        };

        let generation = core.generation;
        let shared = Arc::downgrade(self);
        core.ticker = Some(spawn_ticker(runtime, TICK_INTERVAL, move || {
            shared
                .upgrade()
                .map_or(false, |shared| shared.tick(generation))
        }));
    }

    fn cancel_ticker_locked(core: &mut Core) {
        core.generation = core.generation.wrapping_add(1);
        if let Some(handle) = core.ticker.take() {
            handle.abort();
        }
    }

    /// One countdown step; returns whether the calling ticker should keep going
    fn tick(self: &Arc<Self>, generation: u64) -> bool {
        let mut core = self.lock();
        if core.generation != generation || !core.session.is_running {
            return false;
        }

        core.session.reconcile(self.clock.now());
        if core.session.is_finished() {
            self.advance_locked(&mut core, PhaseChangeReason::Completed);
        }
        self.publish_locked(&core);

        core.generation == generation
    }

    fn publish_locked(&self, core: &Core) {
        if let Err(e) = self.session_tx.send(core.session.clone()) {
            warn!("Failed to publish session update: {}", e);
        }
    }
}

impl Drop for Core {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}
