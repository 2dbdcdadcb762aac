mod core;
mod gateway;
mod gesture;
mod observability;
mod realtime;
mod store;

pub use core::Config;
pub use gateway::GatewayConfig;
pub use gesture::GestureConfig;
pub use observability::ObservabilityConfig;
pub use realtime::RealtimeConfig;
pub use store::StoreConfig;
