// src/routes.rs

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    handlers::{auth, home, messages, posts},
    state::AppState,
    utils::session::auth_middleware,
};

/// Assembles the main application router.
///
/// * Public routes: landing page, registration, login, post feed.
/// * Protected routes sit behind the session gate, layered at registration
///   time so the gate runs before the handler body in all cases.
/// * Applies global middleware (Trace) and injects global state.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(home::index))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/posts", get(posts::feed));

    let protected_routes = Router::new()
        .route("/logout", get(auth::logout))
        .route("/messages", get(messages::list_messages))
        .route(
            "/new_message",
            get(messages::new_message_form).post(messages::send_message),
        )
        .route(
            "/new_post",
            get(posts::new_post_form).post(posts::create_post),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
