use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_profile;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::update_user::update_user;
use super::middleware::authorize;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub authenticator: Arc<Authenticator>,
    pub token_ttl_hours: i64,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    authenticator: Arc<Authenticator>,
    token_ttl_hours: i64,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        token_ttl_hours,
    };

    // GET and POST share /api/users but only listing is gated, so the
    // authorization layer goes on the GET method router alone.
    let list_users_route = get(list_users)
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users", post(create_user).merge(list_users_route));

    let protected_routes = Router::new()
        .route("/api/users/profile", get(get_profile))
        .route("/api/users/profile", patch(update_user))
        .route("/api/users/profile", delete(delete_user))
        .route("/api/users/:user_id", get(get_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
