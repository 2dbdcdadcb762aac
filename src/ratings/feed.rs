use super::types::RatingInserted;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::task::AbortHandle;

pub type FeedSender = broadcast::Sender<RatingInserted>;
pub type FeedReceiver = broadcast::Receiver<RatingInserted>;

struct FeedInner {
    sender: FeedSender,
    next_id: AtomicU64,
    handlers: Mutex<HashMap<u64, AbortHandle>>,
}

/// Push channel of newly inserted ratings, system-wide.
///
/// Notifications are advisory: consumers re-fetch whatever aggregate they
/// show instead of applying the payload as a delta. A slow subscriber that
/// falls more than the channel capacity behind skips the missed events.
#[derive(Clone)]
pub struct RatingFeed {
    inner: Arc<FeedInner>,
}

impl RatingFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(FeedInner {
                sender,
                next_id: AtomicU64::new(1),
                handlers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Broadcast one insert. Returns how many receivers were reached.
    pub fn publish(&self, event: RatingInserted) -> usize {
        // No receivers is the normal idle state, not an error.
        self.inner.sender.send(event).unwrap_or(0)
    }

    /// Raw receiver for consumers that drive their own loop (e.g. a websocket).
    pub fn receiver(&self) -> FeedReceiver {
        self.inner.sender.subscribe()
    }

    /// Register `handler` to run for every insert published from now on.
    ///
    /// Each call creates its own registration; the returned [`Subscription`]
    /// removes exactly that one when unsubscribed or dropped. Must be called
    /// from within a tokio runtime.
    pub fn subscribe<F, Fut>(&self, handler: F) -> Subscription
    where
        F: Fn(RatingInserted) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let mut receiver = self.inner.sender.subscribe();

        let task = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => handler(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(subscription = id, skipped, "feed.lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        self.lock_handlers().insert(id, task.abort_handle());
        tracing::debug!(subscription = id, "feed.subscribed");

        Subscription {
            id,
            feed: Some(Arc::downgrade(&self.inner)),
        }
    }

    /// Number of live handler registrations.
    pub fn active_subscriptions(&self) -> usize {
        self.lock_handlers().len()
    }

    fn lock_handlers(&self) -> std::sync::MutexGuard<'_, HashMap<u64, AbortHandle>> {
        lock_handlers(&self.inner)
    }
}

fn lock_handlers(inner: &FeedInner) -> std::sync::MutexGuard<'_, HashMap<u64, AbortHandle>> {
    inner
        .handlers
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Handle to one feed registration. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    feed: Option<std::sync::Weak<FeedInner>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let Some(feed) = self.feed.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        if let Some(handle) = lock_handlers(&feed).remove(&self.id) {
            handle.abort();
            tracing::debug!(subscription = self.id, "feed.unsubscribed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.feed.is_some())
            .finish()
    }
}
