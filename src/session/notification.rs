use crate::ratings::Outcome;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// Short-lived toast shown to the diner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub variant: NotificationVariant,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Notification {
    pub fn new(title: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: NotificationVariant::Default,
            duration,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.variant = NotificationVariant::Destructive;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }

    pub fn rated(outcome: Outcome) -> Self {
        let title = match outcome {
            Outcome::Like => "Loved it! 😋",
            Outcome::Dislike => "Maybe next time 👋",
        };
        Self::new(title, Duration::from_millis(1500))
    }

    pub fn missing_order_number() -> Self {
        Self::new("Please enter an order number", Duration::from_millis(3000)).destructive()
    }

    pub fn order_failed() -> Self {
        Self::new("Error submitting order", Duration::from_millis(3000))
            .with_description("Please try again later")
            .destructive()
    }

    pub fn rating_failed() -> Self {
        Self::new("Error submitting rating", Duration::from_millis(3000))
            .with_description("Please try again later")
            .destructive()
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}
