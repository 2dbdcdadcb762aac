use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Two-valued result of rating a dish.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Like,
    Dislike,
}

/// A dish as shown on a swipe card. Read-only from the diner's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub restaurant: String,
    /// Display string, e.g. `"$24.99"`
    pub price: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

/// Fields needed to create a dish; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDish {
    pub name: String,
    pub restaurant: String,
    pub price: String,
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewDish {
    /// Tags deduplicated in first-seen order, blank entries dropped.
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !seen.iter().any(|t: &String| t == tag) {
                seen.push(tag.to_string());
            }
        }
        seen
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub dish_id: String,
    #[serde(rename = "rating")]
    pub outcome: Outcome,
    pub comment: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    pub dish_id: String,
    #[serde(rename = "rating")]
    pub outcome: Outcome,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewRating {
    pub fn new(dish_id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            dish_id: dish_id.into(),
            outcome,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Comment with surrounding whitespace removed; blank comments become `None`.
    pub fn normalized_comment(&self) -> Option<String> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishOrder {
    pub id: String,
    pub dish_id: String,
    pub order_id: String,
    pub created_at: String,
}

/// Point-in-time like/dislike aggregate for one dish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingCounts {
    pub likes: u64,
    pub dislikes: u64,
}

impl RatingCounts {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        ratings
            .iter()
            .fold(Self::default(), |mut counts, rating| {
                counts.record(rating.outcome);
                counts
            })
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Like => self.likes += 1,
            Outcome::Dislike => self.dislikes += 1,
        }
    }

    pub const fn total(&self) -> u64 {
        self.likes + self.dislikes
    }
}

/// Realtime notification: one row was inserted into the ratings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingInserted {
    pub rating: Rating,
}

impl RatingInserted {
    pub fn dish_id(&self) -> &str {
        &self.rating.dish_id
    }
}
