//! Cancellable countdown driving the session clock.
//!
//! The countdown is the only autonomous source of session mutation, so its
//! lifecycle is explicit: `Countdown::arm` captures the session epoch and
//! spawns a once-per-second task; the task stops on its own when a tick
//! reports that the phase left `Playing` or the epoch went stale, and
//! dropping the guard aborts it outright. The composition layer re-arms on
//! every deal, so a leftover task from an earlier round can never touch the
//! new round's clock.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::session::GameSession;

/// Shared handle to a session. All transitions are serialized through the
/// mutex, the event-loop analogue of the single-threaded UI this state
/// machine models.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Lock a shared session, recovering from a poisoned mutex.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    match session.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Guard for a running countdown task. Aborts the task when dropped.
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Arm a countdown for the session's current round.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn arm(session: SharedSession) -> Self {
        let epoch = lock_session(&session).epoch();
        let handle = tokio::spawn(async move {
            let mut ticks = interval(Duration::from_secs(1));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if !lock_session(&session).tick_current(epoch) {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop the task immediately.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
