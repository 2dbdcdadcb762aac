use super::traits::{Observer, ObserverEvent, ObserverMetric};
use tracing::{info, warn};

/// Observer that writes every event and metric through `tracing`.
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        match event {
            ObserverEvent::GestureResolved { dish_id, direction } => match direction {
                Some(direction) => {
                    info!(dish_id = %dish_id, direction = %direction, "gesture.decisive");
                }
                None => info!(dish_id = %dish_id, "gesture.returned"),
            },
            ObserverEvent::RatingSubmitted { dish_id, outcome } => {
                info!(dish_id = %dish_id, outcome = %outcome, "rating.submitted");
            }
            ObserverEvent::RatingFailed { dish_id, message } => {
                warn!(dish_id = %dish_id, error = %message, "rating.failed");
            }
            ObserverEvent::OrderLoaded {
                order_number,
                dishes,
            } => {
                info!(order_number = %order_number, dishes = dishes, "order.loaded");
            }
            ObserverEvent::Error { component, message } => {
                warn!(component = %component, error = %message, "error");
            }
        }
    }

    fn record_metric(&self, metric: &ObserverMetric) {
        match metric {
            ObserverMetric::RequestLatency(d) => {
                let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
                info!(latency_ms = ms, "metric.request_latency");
            }
            ObserverMetric::ActiveSubscriptions(n) => {
                info!(subscriptions = n, "metric.active_subscriptions");
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
