pub mod login;
pub mod register;

use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Returns the router for account endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register::register))
        .route("/api/auth/login", post(login::login))
}

#[derive(OpenApi)]
#[openapi(
    paths(register::register, login::login),
    components(schemas(
        register::RegisterRequest,
        login::LoginRequest,
        register::IdentityResponse,
    ))
)]
pub struct ApiDoc;
