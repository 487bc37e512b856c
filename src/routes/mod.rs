pub mod auth;
pub mod category;
pub mod health;
pub mod product;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::middleware::auth::{authenticate, require_admin};
use crate::AppState;

/// Binds every endpoint. Route groups compose middleware in three tiers:
/// none, session, and session + admin gate.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/categories", get(category::list_categories))
        .route("/categories/:id", get(category::get_category))
        .route("/products", get(product::list_products))
        .route("/products/:id", get(product::get_product));

    let session = Router::new()
        .route("/auth/profile", get(auth::get_profile))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    // route_layer order: the last layer added runs first.
    let admin = Router::new()
        .route("/auth/profile", put(auth::update_profile))
        .route("/auth/profile/:id", put(auth::update_profile))
        .route("/categories", post(category::create_category))
        .route(
            "/categories/:id",
            put(category::update_category).delete(category::delete_category),
        )
        .route("/products", post(product::create_product))
        .route(
            "/products/:id",
            put(product::update_product).delete(product::delete_product),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    public.merge(session).merge(admin).with_state(state)
}
