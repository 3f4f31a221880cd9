//! In-flight request limit.
//!
//! A semaphore bounds how many requests are processed at once. When the
//! limit is reached, new requests wait until a slot becomes available.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared permit pool for the limiter middleware.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimit {
    permits: Arc<Semaphore>,
    max: usize,
}

impl ConcurrencyLimit {
    pub fn new(max: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

/// Hold a permit for the duration of the request.
pub async fn limit_concurrency(
    State(limit): State<ConcurrencyLimit>,
    request: Request,
    next: Next,
) -> Response {
    let _permit = match limit.permits.acquire().await {
        Ok(permit) => permit,
        Err(_) => {
            tracing::error!("Concurrency semaphore closed");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    tracing::trace!(available = limit.available(), max = limit.max, "Request slot acquired");
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    #[derive(Default)]
    struct InFlight {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    async fn tracked_work(State(in_flight): State<Arc<InFlight>>) -> &'static str {
        let now = in_flight.current.fetch_add(1, Ordering::SeqCst) + 1;
        in_flight.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        in_flight.current.fetch_sub(1, Ordering::SeqCst);
        "ok"
    }

    #[tokio::test]
    async fn test_permits_are_released() {
        let limit = ConcurrencyLimit::new(2);
        {
            let _a = limit.permits.acquire().await.unwrap();
            assert_eq!(limit.available(), 1);
        }
        assert_eq!(limit.available(), 2);
        assert_eq!(limit.max(), 2);
    }

    #[tokio::test]
    async fn test_requests_wait_for_a_free_slot() {
        let in_flight = Arc::new(InFlight::default());
        let limit = ConcurrencyLimit::new(1);
        let app = Router::new()
            .route("/work", get(tracked_work))
            .with_state(in_flight.clone())
            .layer(middleware::from_fn_with_state(limit.clone(), limit_concurrency));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let start = Instant::now();
        let mut handles = Vec::new();
        for _ in 0..3 {
            let req = client.get(format!("http://{}/work", addr));
            handles.push(tokio::spawn(async move { req.send().await.unwrap().status() }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::OK);
        }

        // one at a time: each waited for the previous to finish
        assert_eq!(in_flight.peak.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(limit.available(), 1);
    }
}
