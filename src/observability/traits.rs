use crate::gesture::SwipeDirection;
use crate::ratings::Outcome;
use std::time::Duration;

/// Events the observer can record
#[derive(Debug, Clone)]
pub enum ObserverEvent {
    GestureResolved {
        dish_id: String,
        direction: Option<SwipeDirection>,
    },
    RatingSubmitted {
        dish_id: String,
        outcome: Outcome,
    },
    RatingFailed {
        dish_id: String,
        message: String,
    },
    OrderLoaded {
        order_number: String,
        dishes: usize,
    },
    Error {
        component: String,
        message: String,
    },
}

/// Numeric metrics
#[derive(Debug, Clone)]
pub enum ObserverMetric {
    RequestLatency(Duration),
    ActiveSubscriptions(u64),
}

/// Sink for pipeline events and metrics.
pub trait Observer: Send + Sync {
    /// Record a discrete event
    fn record_event(&self, event: &ObserverEvent);

    /// Record a numeric metric
    fn record_metric(&self, metric: &ObserverMetric);

    /// Flush any buffered data (no-op for most backends)
    fn flush(&self) {}

    /// Human-readable name of this observer
    fn name(&self) -> &str;
}
