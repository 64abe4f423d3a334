use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

/// Default quiet period before an auto-save fires.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_secs(2);

type WriteFn<T> = dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync;

/// Coalesces bursts of edits into a single write.
///
/// Every [`trigger`](Debouncer::trigger) restarts the quiet-period timer;
/// only the last state within a burst is ever written. A serialized snapshot
/// is compared against the last persisted one so a no-op edit doesn't cause
/// a redundant write.
///
/// The timer reset is not request cancellation: a write that already started
/// runs to completion even if a newer edit arrives (last-response-wins).
pub struct Debouncer<T> {
    window: Duration,
    write: Arc<WriteFn<T>>,
    shared: Arc<Mutex<Shared>>,
}

#[derive(Default)]
struct Shared {
    /// Bumped on every trigger; a sleeping timer that wakes up to find a
    /// newer generation was superseded and does nothing.
    generation: u64,
    last_persisted: Option<String>,
}

impl<T> Debouncer<T>
where
    T: Serialize + Send + 'static,
{
    pub fn new<F, Fut>(window: Duration, write: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            window,
            write: Arc::new(move |state| Box::pin(write(state))),
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Record a new edit. The write fires after the window elapses with no
    /// further triggers, carrying `state` as of this call.
    pub fn trigger(&self, state: T) {
        let snapshot = match serde_json::to_string(&state) {
            Ok(s) => s,
            Err(err) => {
                // Unserializable state cannot be compared or persisted.
                tracing::error!(%err, "debounced state failed to serialize, dropping edit");
                return;
            }
        };

        let generation = {
            let mut shared = self.shared.lock().expect("debouncer lock poisoned");
            shared.generation += 1;
            shared.generation
        };

        let window = self.window;
        let write = Arc::clone(&self.write);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            {
                let guard = shared.lock().expect("debouncer lock poisoned");
                if guard.generation != generation {
                    return; // superseded by a newer edit
                }
                if guard.last_persisted.as_deref() == Some(snapshot.as_str()) {
                    return; // nothing changed since the last save
                }
            }
            write(state).await;
            let mut guard = shared.lock().expect("debouncer lock poisoned");
            guard.last_persisted = Some(snapshot);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_debouncer(
        window: Duration,
    ) -> (Debouncer<Vec<String>>, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(Vec::new()));
        let calls_in = Arc::clone(&calls);
        let last_in = Arc::clone(&last);
        let debouncer = Debouncer::new(window, move |state: Vec<String>| {
            let calls = Arc::clone(&calls_in);
            let last = Arc::clone(&last_in);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = state;
            }
        });
        (debouncer, calls, last)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_coalesces_to_one_write_with_last_state() {
        let window = Duration::from_secs(2);
        let (debouncer, calls, last) = counting_debouncer(window);

        for i in 0..5 {
            debouncer.trigger(vec![format!("edit-{i}")]);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(window * 2).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*last.lock().unwrap(), vec!["edit-4".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_write() {
        let window = Duration::from_secs(2);
        let (debouncer, calls, _) = counting_debouncer(window);

        debouncer.trigger(vec!["first".to_string()]);
        tokio::time::sleep(window * 2).await;
        debouncer.trigger(vec!["second".to_string()]);
        tokio::time::sleep(window * 2).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_state_skips_the_redundant_write() {
        let window = Duration::from_secs(2);
        let (debouncer, calls, _) = counting_debouncer(window);

        debouncer.trigger(vec!["same".to_string()]);
        tokio::time::sleep(window * 2).await;
        debouncer.trigger(vec!["same".to_string()]);
        tokio::time::sleep(window * 2).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
