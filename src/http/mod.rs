//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → middleware/ (in-flight limit)
//!     → handlers.rs (one store operation per request)
//!     → response.rs (bodies, error → status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, CreatedStudent, ErrorBody, MessageBody};
pub use server::{ApiServer, AppState};
