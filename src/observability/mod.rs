//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, store and middleware produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span
//! - Metrics are recorded through the `metrics` facade

pub mod logging;
pub mod metrics;
