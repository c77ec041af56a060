/// RenderSync - per-camera "render complete" handshake.
///
/// The render thread calls `mark_render_complete` after submitting a
/// camera's frame; a consumer blocks in `wait_for_render_complete` until
/// the next such signal. The flag is one-shot: a wait only returns for a
/// signal raised after it started, and several signals without a waiter
/// collapse into one.
///
/// The block is shared through an `Arc` by the camera and every handle,
/// so a waiter keeps it alive even if the camera slot is deleted mid-wait.

use std::time::{Duration, Instant};
use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct SyncState {
    render_ready: bool,
    waiters: usize,
}

#[derive(Debug, Default)]
pub struct RenderSync {
    state: Mutex<SyncState>,
    condvar: Condvar,
}

impl RenderSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the ready flag and wake one waiter
    pub fn mark_render_complete(&self) {
        let mut state = self.state.lock();
        state.render_ready = true;
        drop(state);
        self.condvar.notify_one();
    }

    /// Block until the next `mark_render_complete`
    ///
    /// There is no timeout: without a producer this never returns.
    pub fn wait_for_render_complete(&self) {
        let mut state = self.state.lock();
        state.render_ready = false;
        state.waiters += 1;
        while !state.render_ready {
            self.condvar.wait(&mut state);
        }
        state.waiters -= 1;
        state.render_ready = false;
    }

    /// Same handshake with an upper bound on the wait
    ///
    /// Returns `false` if `timeout` elapsed without a signal.
    pub fn wait_for_render_complete_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        state.render_ready = false;
        state.waiters += 1;
        while !state.render_ready {
            if self.condvar.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.waiters -= 1;
        let signalled = state.render_ready;
        state.render_ready = false;
        signalled
    }

    /// Threads currently blocked in a wait
    pub fn waiting_count(&self) -> usize {
        self.state.lock().waiters
    }

    /// Whether a signal is pending (raised and not yet consumed)
    pub fn is_render_ready(&self) -> bool {
        self.state.lock().render_ready
    }
}

#[cfg(test)]
#[path = "render_sync_tests.rs"]
mod tests;
