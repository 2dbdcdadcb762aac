pub mod schema;

pub use schema::{
    Config, GatewayConfig, GestureConfig, ObservabilityConfig, RealtimeConfig, StoreConfig,
};
