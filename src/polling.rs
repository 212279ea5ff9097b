use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// A job re-run every `period` on the tokio runtime, bound to the lifetime
/// of its owner. Like a browser interval, the first run happens one period
/// after spawning. Cancelling (or dropping) aborts the task, so no further
/// run starts afterwards.
#[derive(Debug)]
pub struct RepeatingTask {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately; skip that tick
            ticker.tick().await;
            loop {
                ticker.tick().await;
                job().await;
            }
        });
        debug!("{} poll started ({:?})", name, period);
        Self {
            name,
            handle: Some(handle),
        }
    }

    /// Like `spawn`, but each wait is drawn fresh from `next_delay`.
    pub fn spawn_jittered<F, Fut, D>(name: &'static str, mut next_delay: D, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
        D: FnMut() -> Duration + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(next_delay()).await;
                job().await;
            }
        });
        Self {
            name,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("{} poll cancelled", self.name);
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Request-generation counter for one fetch slot. Each new request takes a
/// ticket; a response is applied only if its ticket is still the latest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}
