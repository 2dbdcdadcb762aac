use crate::ratings::{Rating, RatingCounts};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Receive a fresh `counts` message after every insert for this dish.
    Watch {
        dish_id: String,
    },
    Unwatch {
        dish_id: String,
    },
    Ping,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Connected {
        version: String,
    },
    RatingInserted {
        rating: Rating,
    },
    Counts {
        dish_id: String,
        likes: u64,
        dislikes: u64,
    },
    Error {
        message: String,
    },
    Pong,
}

impl ServerMessage {
    pub fn counts(dish_id: impl Into<String>, counts: RatingCounts) -> Self {
        Self::Counts {
            dish_id: dish_id.into(),
            likes: counts.likes,
            dislikes: counts.dislikes,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"serialization failed"}"#.to_string())
    }
}
