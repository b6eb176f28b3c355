use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::CredentialVerifier;
use crate::config::{ApiConfig, SecurityConfig};
use crate::database::CustomerStore;
use crate::handlers::{customers, system};
use crate::middleware::auth_gate;

/// Dependencies shared by every request. Built once in `main` and cloned into
/// each handler; both members are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn CustomerStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { store, verifier }
    }
}

/// Full application router. The auth gate wraps every route and the fallback,
/// so unknown paths are rejected with 401 too.
pub fn app(state: AppState, api: &ApiConfig, security: &SecurityConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(customer_routes())
        .fallback(system::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .with_state(state);

    if security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/:id",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        )
}
