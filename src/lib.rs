#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod gesture;
pub mod observability;
pub mod ratings;
pub mod session;
pub mod transport;

pub use config::Config;
pub use error::{ConfigError, StoreError, TransportError};
pub use gesture::{
    Classification, GestureSample, SwipeCard, SwipeDecision, SwipeDirection, classify,
};
pub use ratings::{Outcome, RatingPipeline, RatingStore};
pub use session::DinerSession;
