//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::{AuthService, PasswordResetService};
use crate::domain::UserRepositoryInterface;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{protect, AuthState};
use crate::interfaces::http::modules::auth::{self, AuthHandlerState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::signup,
        auth::handlers::login,
        auth::handlers::forgot_password,
        auth::handlers::reset_password,
        auth::handlers::update_password,
    ),
    components(
        schemas(
            // Common
            ApiResponse<EmptyData>,
            ApiResponse<auth::UserData>,
            EmptyData,
            // Auth
            auth::SignupRequest,
            auth::LoginRequest,
            auth::ForgotPasswordRequest,
            auth::ResetPasswordRequest,
            auth::UpdatePasswordRequest,
            auth::UserDto,
            auth::UserData,
            // Health
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Signup, login, password reset and password change"),
    ),
    info(
        title = "Trailhead Tours API",
        version = "1.0.0",
        description = "Authentication and authorization surface of the Trailhead Tours REST API",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    users: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
    auth_service: Arc<AuthService>,
    reset_service: Arc<PasswordResetService>,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState {
        jwt: jwt_config,
        users,
    };

    let auth_state = AuthHandlerState {
        auth: auth_service,
        reset: reset_service,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // User routes (public)
    let user_routes = Router::new()
        .route("/signup", post(auth::handlers::signup))
        .route("/login", post(auth::handlers::login))
        .route("/forgotPassword", post(auth::handlers::forgot_password))
        .route("/resetPassword/{token}", patch(auth::handlers::reset_password))
        .with_state(auth_state.clone());

    // User routes (bearer token required)
    let user_protected_routes = Router::new()
        .route("/updateMyPassword", patch(auth::handlers::update_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            protect,
        ))
        .with_state(auth_state);

    let health_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .with_state(HealthState {
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .merge(health_routes)
        .merge(metrics_routes)
        // Users / auth
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/users", user_protected_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
