//! Periodic refresh scheduler.

use crate::error::Result;
use futures::FutureExt;
use parking_lot::Mutex;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Lifecycle of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not started yet.
    Idle,
    /// Sleeping until the period elapses or a trigger arrives.
    Waiting,
    /// Running the callback.
    Firing,
    /// Stopped for good.
    Stopped,
}

struct Shared {
    notify: Notify,
    stopped: AtomicBool,
    state: Mutex<SchedulerState>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Shared {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Move to `next` unless already stopped.
    fn transition(&self, next: SchedulerState) {
        let mut state = self.state.lock();
        if *state != SchedulerState::Stopped {
            *state = next;
        }
    }
}

/// Runs a callback once per period, or immediately when triggered.
///
/// Each fire, natural or triggered, restarts the period. The callback never
/// runs concurrently with itself: a trigger that arrives mid-fire causes one
/// more fire right after. Cloning yields another handle to the same
/// scheduler.
#[derive(Clone)]
pub struct RefreshScheduler {
    shared: Arc<Shared>,
}

impl RefreshScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                notify: Notify::new(),
                stopped: AtomicBool::new(false),
                state: Mutex::new(SchedulerState::Idle),
                task: Mutex::new(None),
            }),
        }
    }

    /// Spawn the background task. The first fire happens after `period`
    /// unless triggered sooner.
    ///
    /// Does nothing if the scheduler was already started or stopped.
    pub fn start<F, Fut>(&self, period: Duration, callback: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        {
            let mut state = self.shared.state.lock();
            if *state != SchedulerState::Idle {
                debug!("Scheduler already {:?}, ignoring start", *state);
                return;
            }
            *state = SchedulerState::Waiting;
        }

        info!("Starting refresh scheduler every {:?}", period);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(run(shared, period, callback));
        *self.shared.task.lock() = Some(handle);
    }

    /// Fire now and restart the period.
    ///
    /// Returns `false` if the scheduler is not running.
    pub fn trigger(&self) -> bool {
        if self.shared.is_stopped() || self.state() == SchedulerState::Idle {
            return false;
        }
        self.shared.notify.notify_one();
        true
    }

    /// Stop for good. A pending wait is woken so the task can exit.
    pub fn stop(&self) {
        self.shared.stopped.store(true, Ordering::SeqCst);
        *self.shared.state.lock() = SchedulerState::Stopped;
        self.shared.notify.notify_one();
    }

    pub fn state(&self) -> SchedulerState {
        *self.shared.state.lock()
    }

    /// Wait for the background task to exit.
    pub async fn join(&self) {
        let handle = self.shared.task.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Refresh scheduler task failed: {}", e);
            }
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run<F, Fut>(shared: Arc<Shared>, period: Duration, callback: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    loop {
        if shared.is_stopped() {
            break;
        }

        shared.transition(SchedulerState::Waiting);
        tokio::select! {
            _ = tokio::time::sleep(period) => debug!("Refresh period elapsed"),
            _ = shared.notify.notified() => debug!("Refresh triggered"),
        }

        if shared.is_stopped() {
            break;
        }

        shared.transition(SchedulerState::Firing);
        // The future is built inside the guard as well.
        match AssertUnwindSafe(async { callback().await }).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Refresh failed: {}", e),
            Err(_) => error!("Refresh callback panicked"),
        }
    }

    info!("Refresh scheduler stopped");
}
