use anyhow::{bail, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Fixed-delay repeating fetch task: the next fetch is scheduled only after
/// the previous one settles, so a slow backend never piles up requests.
///
/// A `Poller` owns at most one schedule. `start` on a running poller is
/// rejected; `stop` is idempotent and guarantees the apply callback never
/// runs again, even for a fetch that was in flight when `stop` was called.
pub struct Poller {
    name: String,
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shutdown: None,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Begin the fetch cycle. A failed tick is logged and swallowed; the
    /// next tick proceeds at the normal interval (no backoff).
    pub fn start<T, F, Fut, C, CFut>(
        &mut self,
        interval: Duration,
        mut fetch: F,
        mut apply: C,
    ) -> Result<()>
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        C: FnMut(T) -> CFut + Send + 'static,
        CFut: Future<Output = ()> + Send + 'static,
    {
        if self.shutdown.is_some() {
            bail!("poller '{}' is already running", self.name);
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let name = self.name.clone();

        let handle = tokio::spawn(async move {
            loop {
                let outcome = tokio::select! {
                    result = fetch() => Some(result),
                    _ = shutdown_rx.changed() => None,
                };

                // stop() may have raced the fetch resolving; a result that
                // arrives after the stop signal must not be applied
                if *shutdown_rx.borrow() {
                    break;
                }

                match outcome {
                    Some(Ok(payload)) => apply(payload).await,
                    Some(Err(err)) => log::warn!("{name}: fetch failed: {err:#}"),
                    None => break,
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            log::debug!("{name}: schedule stopped");
        });

        self.shutdown = Some(shutdown_tx);
        self.handle = Some(handle);
        Ok(())
    }

    /// Cancel the schedule. Safe to call repeatedly or before `start`.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        self.handle.take();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_apply(applied: Arc<AtomicUsize>) -> impl FnMut(usize) -> std::future::Ready<()> {
        move |_payload| {
            applied.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn continues_past_a_failing_tick() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let applied = Arc::new(AtomicUsize::new(0));

        let mut poller = Poller::new("test");
        let fetch = {
            let fetches = fetches.clone();
            move || {
                let fetches = fetches.clone();
                async move {
                    let tick = fetches.fetch_add(1, Ordering::SeqCst) + 1;
                    if tick == 2 {
                        bail!("tick 2 fails");
                    }
                    Ok(tick)
                }
            }
        };
        poller
            .start(
                Duration::from_millis(50),
                fetch,
                counting_apply(applied.clone()),
            )
            .unwrap();

        // Ticks land at t = 0, 50, 100, 150, 200.
        tokio::time::sleep(Duration::from_millis(220)).await;
        poller.stop();

        assert_eq!(fetches.load(Ordering::SeqCst), 5);
        assert_eq!(applied.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_future_samples() {
        let applied = Arc::new(AtomicUsize::new(0));

        let mut poller = Poller::new("test");
        poller
            .start(
                Duration::from_millis(50),
                || async { Ok(0usize) },
                counting_apply(applied.clone()),
            )
            .unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;
        poller.stop();
        let at_stop = applied.load(Ordering::SeqCst);
        assert_eq!(at_stop, 3);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(applied.load(Ordering::SeqCst), at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_fetch_is_dropped_after_stop() {
        let applied = Arc::new(AtomicUsize::new(0));

        let mut poller = Poller::new("test");
        // Every fetch takes 100 ms to resolve; stop lands mid-flight.
        poller
            .start(
                Duration::from_millis(10),
                || async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Ok(0usize)
                },
                counting_apply(applied.clone()),
            )
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        poller.stop();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(applied.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_is_rejected() {
        let applied = Arc::new(AtomicUsize::new(0));

        let mut poller = Poller::new("test");
        poller
            .start(
                Duration::from_millis(50),
                || async { Ok(0usize) },
                counting_apply(applied.clone()),
            )
            .unwrap();

        let second = poller.start(
            Duration::from_millis(50),
            || async { Ok(0usize) },
            counting_apply(applied.clone()),
        );
        assert!(second.is_err());
        assert!(poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_allows_restart() {
        let applied = Arc::new(AtomicUsize::new(0));

        let mut poller = Poller::new("test");
        poller.stop();
        assert!(!poller.is_running());

        poller
            .start(
                Duration::from_millis(50),
                || async { Ok(0usize) },
                counting_apply(applied.clone()),
            )
            .unwrap();
        poller.stop();
        poller.stop();
        assert!(!poller.is_running());

        // Idle → Running is allowed again after a clean stop.
        poller
            .start(
                Duration::from_millis(50),
                || async { Ok(0usize) },
                counting_apply(applied.clone()),
            )
            .unwrap();
        assert!(poller.is_running());
    }
}
