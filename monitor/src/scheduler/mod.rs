//! Per-session monitoring timers
//!
//! Each chat session that activates monitoring gets exactly one recurring
//! timer. On every fire the timer re-checks that the session is still
//! active, runs the health pipeline and queues the resulting message for
//! delivery.
//!
//! # Overlap policy
//!
//! A session never runs two ticks at once. Ticks run inline on the
//! session's timer task, and fires that come due while a tick is still
//! running are skipped (`MissedTickBehavior::Skip`). Manual ticks share the
//! same per-session guard and are skipped while a scheduled tick runs.
//! The guard belongs to the session id rather than to one activation, so a
//! session re-activated while its previous tick drains still waits for it.
//!
//! # Delivery
//!
//! Messages go into a bounded per-session queue drained by a delivery task,
//! so a slow sink never holds up the timer. Each session's messages reach
//! the sink in fire order; a full queue drops the newest report.
//!
//! # Cancellation
//!
//! Deactivation stops future fires only. A tick that is already running
//! completes and still delivers its message.

pub mod sessions;
pub use sessions::{
    timer_key, ActivationOutcome, DeactivationOutcome, SessionScheduler, SessionStatus,
    TickOutcome,
};

use async_trait::async_trait;

use crate::alerts::AlertMessage;
use crate::errors::HealthError;

/// The work performed on every tick
#[async_trait]
pub trait TickPipeline: Send + Sync {
    async fn run_tick(&self) -> Result<AlertMessage, HealthError>;

    /// Short notice delivered instead of a report when a tick fails
    fn format_error(&self, error: &HealthError) -> AlertMessage;
}
