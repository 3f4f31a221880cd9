//! Student records HTTP API library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::schema::ApiConfig;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use store::{Student, StudentStore};
