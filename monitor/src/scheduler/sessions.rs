// File: monitor/src/scheduler/sessions.rs
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use super::TickPipeline;
use crate::alerts::AlertMessage;
use crate::services::NotificationSink;

/// Name of the timer owned by a session
pub fn timer_key(session_id: &str) -> String {
    format!("monitor_{}", session_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationOutcome {
    Activated,
    AlreadyActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeactivationOutcome {
    Deactivated,
    AlreadyInactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOutcome {
    /// Report produced and queued for delivery
    Completed,
    /// Pipeline failed; an error notice was queued for delivery
    Failed,
    /// Session was not active at fire time
    Dropped,
    /// Another tick of the same session was still running
    Skipped,
}

impl ActivationOutcome {
    pub fn message(&self, interval: Duration) -> String {
        match self {
            ActivationOutcome::Activated => format!(
                "✅ Monitoring activated. You'll receive updates every {}.",
                describe_interval(interval)
            ),
            ActivationOutcome::AlreadyActive => "🔍 Monitoring is already active.".to_string(),
        }
    }
}

impl DeactivationOutcome {
    pub fn message(&self) -> String {
        match self {
            DeactivationOutcome::Deactivated => "❌ Monitoring deactivated.".to_string(),
            DeactivationOutcome::AlreadyInactive => {
                "🔍 Monitoring is already inactive.".to_string()
            }
        }
    }
}

fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub active: bool,
    pub interval_seconds: u64,
    pub timer_key: Option<String>,
}

/// Queued alerts per session before further reports are dropped
const OUTBOX_CAPACITY: usize = 16;

// Outlives a single activation: a re-activated session reuses the lane of
// its predecessor while that predecessor still has a tick in flight
struct SessionLane {
    session_id: String,
    tick_guard: Mutex<()>,
    outbox: mpsc::Sender<AlertMessage>,
}

impl SessionLane {
    fn enqueue(&self, message: AlertMessage) {
        match self.outbox.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!(
                "Delivery queue for session {} is full, dropping report",
                self.session_id
            ),
            Err(TrySendError::Closed(_)) => error!(
                "Delivery queue for session {} is closed, dropping report",
                self.session_id
            ),
        }
    }
}

struct LaneSlot {
    lane: Weak<SessionLane>,
    worker: JoinHandle<()>,
}

// Shared between the registry entry and the session's timer task
struct SessionState {
    session_id: String,
    active: AtomicBool,
    cancel: Notify,
    lane: Arc<SessionLane>,
}

impl SessionState {
    fn new(session_id: &str, lane: Arc<SessionLane>) -> Self {
        Self {
            session_id: session_id.to_string(),
            active: AtomicBool::new(true),
            cancel: Notify::new(),
            lane,
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.cancel.notify_one();
    }
}

struct SessionEntry {
    state: Arc<SessionState>,
    timer_key: String,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<String, SessionEntry>,
    lanes: HashMap<String, LaneSlot>,
}

impl Registry {
    fn lane_for(
        &mut self,
        session_id: &str,
        sink: &Arc<dyn NotificationSink>,
    ) -> Arc<SessionLane> {
        self.lanes
            .retain(|_, slot| slot.lane.strong_count() > 0 || !slot.worker.is_finished());

        let previous = match self.lanes.remove(session_id) {
            Some(slot) => match slot.lane.upgrade() {
                Some(lane) => {
                    debug!("Session {} reuses its draining lane", session_id);
                    self.lanes.insert(session_id.to_string(), slot);
                    return lane;
                }
                None => Some(slot.worker),
            },
            None => None,
        };

        let (outbox, queue) = mpsc::channel(OUTBOX_CAPACITY);
        let lane = Arc::new(SessionLane {
            session_id: session_id.to_string(),
            tick_guard: Mutex::new(()),
            outbox,
        });
        let worker = tokio::spawn(run_delivery(
            session_id.to_string(),
            queue,
            sink.clone(),
            previous,
        ));

        self.lanes.insert(
            session_id.to_string(),
            LaneSlot {
                lane: Arc::downgrade(&lane),
                worker,
            },
        );
        lane
    }
}

/// Registry of monitoring sessions and the one timer each of them owns
#[derive(Clone)]
pub struct SessionScheduler {
    sessions: Arc<RwLock<Registry>>,
    pipeline: Arc<dyn TickPipeline>,
    sink: Arc<dyn NotificationSink>,
    interval: Duration,
    initial_delay: Duration,
}

impl SessionScheduler {
    pub fn new(
        pipeline: Arc<dyn TickPipeline>,
        sink: Arc<dyn NotificationSink>,
        interval: Duration,
        initial_delay: Duration,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Registry::default())),
            pipeline,
            sink,
            // tokio intervals reject a zero period
            interval: interval.max(Duration::from_millis(1)),
            initial_delay,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[instrument(skip(self))]
    pub async fn activate(&self, session_id: &str) -> ActivationOutcome {
        let mut registry = self.sessions.write().await;

        if let Some(entry) = registry.entries.get(session_id) {
            if !entry.handle.is_finished() {
                info!("Monitoring already active for session {}", session_id);
                return ActivationOutcome::AlreadyActive;
            }
            warn!(
                "Timer {} for session {} ended unexpectedly, replacing it",
                entry.timer_key, session_id
            );
        }

        let lane = registry.lane_for(session_id, &self.sink);
        let state = Arc::new(SessionState::new(session_id, lane));
        let handle = tokio::spawn(run_timer(
            state.clone(),
            self.pipeline.clone(),
            self.interval,
            self.initial_delay,
        ));

        registry.entries.insert(
            session_id.to_string(),
            SessionEntry {
                state,
                timer_key: timer_key(session_id),
                handle,
            },
        );

        info!(
            "Monitoring activated for session {} (every {:?}, first update in {:?})",
            session_id, self.interval, self.initial_delay
        );
        ActivationOutcome::Activated
    }

    #[instrument(skip(self))]
    pub async fn deactivate(&self, session_id: &str) -> DeactivationOutcome {
        let removed = self.sessions.write().await.entries.remove(session_id);

        match removed {
            Some(entry) => {
                entry.state.stop();
                info!(
                    "Monitoring deactivated for session {} (timer {})",
                    session_id, entry.timer_key
                );
                DeactivationOutcome::Deactivated
            }
            None => {
                debug!("Monitoring already inactive for session {}", session_id);
                DeactivationOutcome::AlreadyInactive
            }
        }
    }

    /// Run one tick for `session_id` now, outside its timer cadence
    #[instrument(skip(self))]
    pub async fn tick(&self, session_id: &str) -> TickOutcome {
        let state = self
            .sessions
            .read()
            .await
            .entries
            .get(session_id)
            .map(|entry| entry.state.clone());

        match state {
            Some(state) => fire(&state, self.pipeline.as_ref()).await,
            None => {
                debug!("Tick for inactive session {} dropped", session_id);
                TickOutcome::Dropped
            }
        }
    }

    pub async fn is_active(&self, session_id: &str) -> bool {
        self.sessions.read().await.entries.contains_key(session_id)
    }

    pub async fn session_status(&self, session_id: &str) -> SessionStatus {
        let registry = self.sessions.read().await;
        let entry = registry.entries.get(session_id);

        SessionStatus {
            session_id: session_id.to_string(),
            active: entry.is_some(),
            interval_seconds: self.interval.as_secs(),
            timer_key: entry.map(|e| e.timer_key.clone()),
        }
    }

    pub async fn active_sessions(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().await.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of timers that are still scheduled to fire
    pub async fn live_timer_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .entries
            .values()
            .filter(|entry| !entry.handle.is_finished())
            .count()
    }

    /// Deactivate every session, wait for in-flight ticks and flush queued alerts
    pub async fn shutdown(&self) {
        let entries: Vec<(String, SessionEntry)> =
            self.sessions.write().await.entries.drain().collect();

        if !entries.is_empty() {
            info!("Stopping {} monitoring session(s)", entries.len());
        }
        let mut handles = Vec::with_capacity(entries.len());
        for (session_id, entry) in entries {
            entry.state.stop();
            debug!("Stopped timer {} for session {}", entry.timer_key, session_id);
            handles.push(entry.handle);
        }

        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                error!("Monitoring timer task panicked: {}", e);
            }
        }

        // Queues close once the last timer holding their lane is gone
        let workers: Vec<JoinHandle<()>> = self
            .sessions
            .write()
            .await
            .lanes
            .drain()
            .map(|(_, slot)| slot.worker)
            .collect();
        for result in futures::future::join_all(workers).await {
            if let Err(e) = result {
                error!("Delivery task panicked: {}", e);
            }
        }
    }
}

async fn run_timer(
    state: Arc<SessionState>,
    pipeline: Arc<dyn TickPipeline>,
    period: Duration,
    initial_delay: Duration,
) {
    let mut ticker = interval_at(Instant::now() + initial_delay, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = state.cancel.notified() => break,
            _ = ticker.tick() => {
                let started = Instant::now();
                fire(&state, pipeline.as_ref()).await;

                let elapsed = started.elapsed();
                if elapsed > period {
                    warn!(
                        "Tick for session {} took {:?}, longer than the {:?} interval; overdue fires skipped",
                        state.session_id, elapsed, period
                    );
                }
            }
        }
    }

    debug!("Timer {} stopped", timer_key(&state.session_id));
}

async fn fire(state: &SessionState, pipeline: &dyn TickPipeline) -> TickOutcome {
    if !state.is_active() {
        debug!("Session {} inactive at fire time, tick dropped", state.session_id);
        return TickOutcome::Dropped;
    }

    let Ok(_guard) = state.lane.tick_guard.try_lock() else {
        warn!(
            "Tick for session {} still running, skipping this fire",
            state.session_id
        );
        return TickOutcome::Skipped;
    };

    let (message, outcome) = match pipeline.run_tick().await {
        Ok(message) => (message, TickOutcome::Completed),
        Err(e) => {
            error!("Monitoring update for session {} failed: {}", state.session_id, e);
            (pipeline.format_error(&e), TickOutcome::Failed)
        }
    };

    // Enqueued while the guard is held, so queue order is fire order
    state.lane.enqueue(message);
    outcome
}

async fn run_delivery(
    session_id: String,
    mut queue: mpsc::Receiver<AlertMessage>,
    sink: Arc<dyn NotificationSink>,
    previous: Option<JoinHandle<()>>,
) {
    if let Some(previous) = previous {
        let _ = previous.await;
    }

    while let Some(message) = queue.recv().await {
        if let Err(e) = sink.deliver(&session_id, &message).await {
            warn!("Delivery to session {} failed: {}", session_id, e);
        }
    }

    debug!("Delivery queue for session {} closed", session_id);
}
