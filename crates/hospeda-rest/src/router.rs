//! Main application router.

use crate::{
    controllers::{
        auth_controller, booking_controller, health_controller, property_controller,
        review_controller, user_controller,
    },
    middleware::{
        auth_middleware, logging_middleware, rate_limit_middleware, timeout_middleware,
        AuthMiddlewareState,
    },
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use hospeda_config::ServerConfig;
use hospeda_resilience::RateLimiters;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the main application router.
///
/// `rate_limiters` is `None` when rate limiting is disabled in configuration.
pub fn create_router(
    state: AppState,
    auth_state: AuthMiddlewareState,
    rate_limiters: Option<RateLimiters>,
    server_config: &ServerConfig,
) -> Router {
    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/users", user_controller::router())
        .nest("/properties", property_controller::router())
        .nest("/bookings", booking_controller::router())
        .nest("/reviews", review_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(middleware::from_fn_with_state(
            server_config.request_timeout(),
            timeout_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(server_config.max_body_size));

    if let Some(limiters) = rate_limiters {
        router = router.layer(middleware::from_fn_with_state(limiters, rate_limit_middleware));
    } else {
        info!("Rate limiting disabled");
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let router = router
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Hospeda API v1"
}
