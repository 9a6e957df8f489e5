use crate::session::{
    ClientSettings, CredentialStore, EventKind, EventTarget, Listener, ListenerId, SessionHost,
    ACTIVITY_EVENTS, SESSION_EXPIRED_NOTICE,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogPhase {
    /// Credential present, exactly one timer armed.
    Active,
    /// The inactivity timeout fired; terminal for this mount.
    Expired,
    /// Unmounted.
    Idle,
}

#[derive(Debug, thiserror::Error)]
pub enum WatchdogError {
    #[error("session watchdog needs a Tokio runtime for its idle timer: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

/// Result of mounting the watchdog on a protected view.
#[must_use = "dropping the watchdog unmounts it"]
pub enum Mounted {
    Watching(SessionWatchdog),
    /// No credential was stored; the host was sent to the login view and
    /// nothing was armed.
    RedirectedToLogin,
}

impl Mounted {
    pub fn watchdog(&self) -> Option<&SessionWatchdog> {
        match self {
            Self::Watching(watchdog) => Some(watchdog),
            Self::RedirectedToLogin => None,
        }
    }

    pub fn into_watchdog(self) -> Option<SessionWatchdog> {
        match self {
            Self::Watching(watchdog) => Some(watchdog),
            Self::RedirectedToLogin => None,
        }
    }
}

struct TimerState {
    phase: WatchdogPhase,
    /// Bumped on every re-arm; a timer only acts on its own generation.
    generation: u64,
    last_activity: Instant,
    timer: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<TimerState>,
    idle_timeout: Duration,
    storage_key: String,
    login_path: String,
    store: Arc<dyn CredentialStore>,
    host: Arc<dyn SessionHost>,
    runtime: Handle,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels the outstanding timer and schedules a fresh one a full
    /// `idle_timeout` from now.
    fn rearm(self: &Arc<Self>, state: &mut TimerState) {
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation += 1;
        state.last_activity = Instant::now();

        let generation = state.generation;
        let deadline = state.last_activity + self.idle_timeout;
        let shared: Weak<Shared> = Arc::downgrade(self);
        state.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(shared) = shared.upgrade() {
                shared.expire(generation);
            }
        }));
    }

    fn on_activity(self: &Arc<Self>, kind: EventKind) {
        let mut state = self.state();
        if state.phase != WatchdogPhase::Active {
            return;
        }
        tracing::trace!(event = ?kind, "session activity, re-arming idle timer");
        self.rearm(&mut state);
    }

    fn expire(&self, generation: u64) {
        {
            let mut state = self.state();
            if state.phase != WatchdogPhase::Active || state.generation != generation {
                return;
            }
            state.phase = WatchdogPhase::Expired;
            // this task is the timer; dropping the handle just detaches it
            state.timer = None;
        }

        tracing::info!(
            idle_timeout_secs = self.idle_timeout.as_secs(),
            "session expired due to inactivity"
        );
        self.host.alert(SESSION_EXPIRED_NOTICE);
        if let Err(err) = self.store.remove(&self.storage_key) {
            tracing::error!("failed to erase the stored credential: {}", err);
        }
        self.host.navigate(&self.login_path);
    }
}

/// Inactivity watchdog of one mounted protected view.
///
/// Every recognized activity event cancels the pending timer and arms a new
/// one, so the timeout fires `idle_timeout` after the most recent activity.
/// Dropping the handle unmounts: the timer is cancelled and every listener
/// is detached before `drop` returns.
pub struct SessionWatchdog {
    shared: Arc<Shared>,
    events: EventTarget,
    listeners: Vec<ListenerId>,
}

impl SessionWatchdog {
    /// Mounts the watchdog for a protected view.
    ///
    /// A blank stored value counts as no credential. Arming the idle timer
    /// needs a Tokio runtime; without one nothing is registered and
    /// [`WatchdogError::NoRuntime`] is returned.
    pub fn mount(
        settings: &ClientSettings,
        store: Arc<dyn CredentialStore>,
        host: Arc<dyn SessionHost>,
        events: &EventTarget,
    ) -> Result<Mounted, WatchdogError> {
        let credential = match store.get(&settings.storage_key) {
            Ok(credential) => credential.filter(|token| !token.trim().is_empty()),
            Err(err) => {
                tracing::warn!("credential store unreadable, treating as logged out: {}", err);
                None
            }
        };

        if credential.is_none() {
            tracing::debug!("no stored credential, redirecting to login");
            host.navigate(&settings.login_path);
            return Ok(Mounted::RedirectedToLogin);
        }

        let runtime = Handle::try_current()?;

        let shared = Arc::new(Shared {
            state: Mutex::new(TimerState {
                phase: WatchdogPhase::Active,
                generation: 0,
                last_activity: Instant::now(),
                timer: None,
            }),
            idle_timeout: settings.idle_timeout,
            storage_key: settings.storage_key.clone(),
            login_path: settings.login_path.clone(),
            store,
            host,
            runtime,
        });

        {
            let mut state = shared.state();
            shared.rearm(&mut state);
        }

        let listeners = ACTIVITY_EVENTS
            .iter()
            .map(|kind| {
                let weak = Arc::downgrade(&shared);
                let listener: Listener = Arc::new(move |kind: EventKind| {
                    if let Some(shared) = weak.upgrade() {
                        shared.on_activity(kind);
                    }
                });
                events.add_listener(*kind, listener)
            })
            .collect();

        tracing::debug!(
            idle_timeout_secs = settings.idle_timeout.as_secs(),
            "session watchdog mounted"
        );

        Ok(Mounted::Watching(Self {
            shared,
            events: events.clone(),
            listeners,
        }))
    }

    pub fn phase(&self) -> WatchdogPhase {
        self.shared.state().phase
    }

    pub fn last_activity(&self) -> Instant {
        self.shared.state().last_activity
    }

    /// Instant at which the pending timer fires, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        let state = self.shared.state();
        match state.phase {
            WatchdogPhase::Active => Some(state.last_activity + self.shared.idle_timeout),
            _ => None,
        }
    }

    /// Same as dropping the handle.
    pub fn unmount(self) {}

    fn teardown(&mut self) {
        for id in self.listeners.drain(..) {
            self.events.remove_listener(id);
        }

        let mut state = self.shared.state();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        if state.phase == WatchdogPhase::Active {
            tracing::debug!("session watchdog unmounted");
        }
        state.phase = WatchdogPhase::Idle;
    }
}

impl Drop for SessionWatchdog {
    fn drop(&mut self) {
        self.teardown();
    }
}
