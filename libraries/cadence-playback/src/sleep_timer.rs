//! Sleep timer countdown task
//!
//! A detached tokio task that invokes a callback once per tick until the
//! callback reports completion or the timer is cancelled.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::warn;

/// What the countdown should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tick {
    Continue,
    Done,
}

/// Handle to a running countdown
///
/// Dropping the handle detaches the task; use [`SleepTimer::cancel`] to stop it.
#[derive(Debug)]
pub(crate) struct SleepTimer {
    handle: JoinHandle<()>,
}

impl SleepTimer {
    /// Spawn a countdown on the current tokio runtime
    ///
    /// The first tick fires one `period` after spawning. Returns `None`
    /// outside a runtime.
    pub(crate) fn spawn<F>(period: Duration, mut on_tick: F) -> Option<Self>
    where
        F: FnMut() -> Tick + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("Sleep timer requires a tokio runtime");
            return None;
        };

        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if on_tick() == Tick::Done {
                    break;
                }
            }
        });

        Some(Self { handle })
    }

    /// Stop the countdown
    pub(crate) fn cancel(self) {
        self.handle.abort();
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
