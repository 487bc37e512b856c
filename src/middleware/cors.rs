use axum::http::{header, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Cross-origin access for cookie sessions: credentialed requests need the
/// request origin mirrored back, a wildcard origin is refused by browsers.
pub fn session_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
