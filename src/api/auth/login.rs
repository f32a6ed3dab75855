use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::User;
use crate::schema::users;

use super::register::IdentityResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "maria@example.com", "password": "password123"})),
    responses(
        (status = 200, description = "Login successful", body = IdentityResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    let user: User = users::table
        .filter(users::email.eq(req.email.trim()))
        .select(User::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    }

    let token = create_session(&mut conn, user.id)?;

    Ok(Json(IdentityResponse::new(user, token)))
}
