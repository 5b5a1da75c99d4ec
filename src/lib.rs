//! REST gateway over the Planner schema (users, settings, sessions, tasks,
//! categories, tags). Every data route runs one parameterized statement
//! against MySQL behind HTTP Basic authentication.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::{from_fn_with_state, map_response},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::CredentialStore;
use crate::config::{ApiConfig, AppConfig, SecurityConfig};
use crate::database::Gateway;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub credentials: Arc<dyn CredentialStore>,
    pub route_prefix: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, credentials: Arc<dyn CredentialStore>, api: &ApiConfig) -> Self {
        Self {
            gateway,
            credentials,
            route_prefix: Arc::from(api.route_prefix()),
        }
    }
}

/// Full application router. Authentication wraps every route, the root
/// redirect and the 404 fallback; CORS sits outside it so preflights pass.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::system::health))
        .merge(user_routes())
        .merge(settings_routes())
        .merge(session_routes())
        .merge(task_routes())
        .merge(category_routes())
        .merge(tag_routes());

    let mut router = Router::new()
        .route("/", get(handlers::system::root))
        .nest(&state.route_prefix, api)
        .fallback(handlers::system::not_found)
        .layer(from_fn_with_state(state.clone(), middleware::basic_auth_middleware))
        .layer(map_response(middleware::envelope_method_not_allowed))
        .with_state(state);

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }

    router
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/get_user", get(users::get_user))
        .route("/get_user_bio", get(users::get_user_bio))
        .route("/add_user", post(users::add_user))
        .route("/update_user", put(users::update_user))
}

fn settings_routes() -> Router<AppState> {
    use handlers::settings;

    Router::new()
        .route("/get_settings", get(settings::get_settings))
        .route("/set_settings", post(settings::set_settings))
        .route("/update_settings", put(settings::update_settings))
}

fn session_routes() -> Router<AppState> {
    use handlers::sessions;

    Router::new()
        .route("/get_sessions", get(sessions::get_sessions))
        .route("/get_last_session", get(sessions::get_last_session))
        .route("/add_session", post(sessions::add_session))
}

fn task_routes() -> Router<AppState> {
    use handlers::tasks;

    Router::new()
        .route("/get_tasks", get(tasks::get_tasks))
        .route("/add_task", post(tasks::add_task))
        .route("/update_task", put(tasks::update_task))
        .route("/delete_task", delete(tasks::delete_task))
}

fn category_routes() -> Router<AppState> {
    use handlers::categories;

    Router::new()
        .route("/get_categories", get(categories::get_categories))
        .route("/add_category", post(categories::add_category))
        .route("/update_category", put(categories::update_category))
        .route("/delete_category", delete(categories::delete_category))
}

fn tag_routes() -> Router<AppState> {
    Router::new().route("/get_tags", get(handlers::tags::get_tags))
}

/// `*` allows any origin; otherwise only the listed origins
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
