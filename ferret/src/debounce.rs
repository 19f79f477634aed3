//! Cancel-and-replace scheduling.
//!
//! Each `schedule` call replaces the single pending deferred task: the
//! previous token is cancelled and only the newest work survives its quiet
//! window. The token races the whole job (wait plus work), so a superseded
//! render aborts at its next await point and never reaches the surface.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub(crate) struct Debouncer {
    window: Duration,
    current: Mutex<Option<(CancellationToken, JoinHandle<()>)>>,
}

impl Debouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            current: Mutex::new(None),
        }
    }

    /// Schedule `work` to run on `handle` after the quiet window, cancelling
    /// whatever was pending.
    pub(crate) fn schedule<F>(&self, handle: &tokio::runtime::Handle, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let window = self.window;
        let task = handle.spawn({
            let token = token.clone();
            async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = async {
                        tokio::time::sleep(window).await;
                        work.await;
                    } => {}
                }
            }
        });

        let mut current = self.current.lock();
        if let Some((stale, _)) = current.replace((token, task)) {
            stale.cancel();
        }
    }

    /// Await the pending task, if any. Used by hosts at teardown and by
    /// tests to make timer-driven renders deterministic.
    pub(crate) async fn settle(&self) {
        let pending = self.current.lock().take();
        if let Some((_, task)) = pending {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_only_newest_scheduled_work_runs() {
        let ran = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(200));
        let handle = tokio::runtime::Handle::current();

        for marker in [1usize, 2, 3] {
            let ran = ran.clone();
            debouncer.schedule(&handle, async move {
                ran.store(marker, Ordering::SeqCst);
            });
        }
        debouncer.settle().await;

        assert_eq!(ran.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_with_nothing_pending() {
        let debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_work_waits_out_the_window() {
        let ran = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(200));
        let handle = tokio::runtime::Handle::current();

        let flag = ran.clone();
        debouncer.schedule(&handle, async move {
            flag.store(1, Ordering::SeqCst);
        });
        // Nothing fires inside the quiet window.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 0);

        debouncer.settle().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}
