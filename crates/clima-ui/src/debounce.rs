//! Trailing-edge debounce with per-call cancellation.
//!
//! Every `schedule` supersedes the previous one: its timer is dropped and,
//! if it already fired, its in-flight work is cancelled so a stale result
//! can never land after a newer one.

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct Debouncer {
    delay: Duration,
    current: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `work` once `delay` passes without another call to `schedule`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, work: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("Debounced call superseded before firing");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Stale debounced call cancelled in flight");
                }
                _ = work => {}
            }
        })
    }

    /// Drop whatever is pending or running
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_time() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = debouncer.schedule(counting(&calls));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        handle.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for i in 1..=4 {
            let calls = calls.clone();
            let last = last.clone();
            handles.push(debouncer.schedule(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                last.store(i, Ordering::SeqCst);
            }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_schedule_cancels_in_flight_work() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        let finished = Arc::new(AtomicUsize::new(0));

        let slow = {
            let finished = finished.clone();
            debouncer.schedule(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                finished.fetch_add(1, Ordering::SeqCst);
            })
        };

        // Let the first call fire and start its slow work
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = debouncer.schedule(counting(&finished));

        slow.await.unwrap();
        fast.await.unwrap();
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let calls = Arc::new(AtomicUsize::new(0));

        let handle = debouncer.schedule(counting(&calls));
        debouncer.cancel();

        handle.await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
