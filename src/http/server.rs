//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all student routes
//! - Wire up middleware (request ID, tracing, limits, timeout, metrics)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::http::handlers::{
    create_student, delete_student, get_student_by_id, get_student_by_name,
    get_student_by_name_and_age, index, list_students, patch_student, replace_student,
};
use crate::http::middleware::{limit_concurrency, ConcurrencyLimit};
use crate::http::request::{make_request_span, MakeRequestUuidV4, X_REQUEST_ID};
use crate::observability::metrics::track_metrics;
use crate::store::StudentStore;

/// Value of the `server` response header.
const SERVER_NAME: &str = concat!("student-api/", env!("CARGO_PKG_VERSION"));

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: StudentStore,
}

/// HTTP server for the student API.
pub struct ApiServer {
    router: Router,
    config: ApiConfig,
    store: StudentStore,
}

impl ApiServer {
    /// Create a server with a store built from the configuration.
    pub fn new(config: ApiConfig) -> Self {
        let store = StudentStore::from_config(&config.store);
        Self::with_store(config, store)
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ApiConfig, store: StudentStore) -> Self {
        let state = AppState {
            store: store.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all student routes.
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        let mut student_by_id = put(replace_student)
            .patch(patch_student)
            .delete(delete_student);
        if config.routes.legacy_get_delete {
            tracing::warn!("Serving deletion on GET /student/{{id}}");
            student_by_id = student_by_id.get(delete_student);
        }

        let routes = Router::new()
            .route("/", get(index))
            .route("/students", get(list_students))
            .route("/students/name", get(get_student_by_name))
            .route("/students/age/{age}", get(get_student_by_name_and_age))
            .route("/students/{id}", get(get_student_by_id))
            .route("/student", post(create_student))
            .route("/student/{id}", student_by_id)
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state);

        with_middleware(routes, config)
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            records = self.store.len(),
            legacy_get_delete = self.config.routes.legacy_get_delete,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Handle to the store backing this server.
    pub fn store(&self) -> &StudentStore {
        &self.store
    }
}

/// Wrap `router` in the request ID, tracing, timeout, concurrency and body-size layers.
#[allow(deprecated)]
fn with_middleware(router: Router, config: &ApiConfig) -> Router {
    let limit = ConcurrencyLimit::new(config.listener.max_concurrent_requests);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                make_request_span(request)
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static(SERVER_NAME),
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(limit, limit_concurrency))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::net::SocketAddr;

    async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        addr
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let mut config = ApiConfig::default();
        config.timeouts.request_secs = 1;

        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let addr = serve(with_middleware(slow, &config)).await;

        let res = client()
            .get(format!("http://{}/slow", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_server_header_set() {
        let server = ApiServer::new(ApiConfig::default());
        let addr = serve(server.router).await;

        let res = client()
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("server").unwrap(), SERVER_NAME);
    }
}
