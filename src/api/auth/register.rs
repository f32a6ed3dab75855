use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::{create_session, hash_password};
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{NewUser, User};
use crate::schema::users;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Identity plus a fresh bearer token, returned by register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdentityResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub token: String,
}

impl IdentityResponse {
    pub fn new(user: User, token: String) -> Self {
        IdentityResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
            avatar_url: user.avatar_url,
            role: user.role,
            token,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body(content = RegisterRequest, example = json!({"username": "chefmaria", "email": "maria@example.com", "password": "password123"})),
    responses(
        (status = 201, description = "Account created", body = IdentityResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email already in use", body = ErrorResponse)
    )
)]
pub async fn register(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.trim().is_empty() {
        return Err(ApiError::Validation("Username cannot be empty".to_string()));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::Validation("Password cannot be empty".to_string()));
    }

    let mut conn = pool.get()?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?;

    let new_user = NewUser {
        username: req.username.trim(),
        email: req.email.trim(),
        password_hash: &password_hash,
        bio: None,
        avatar_url: None,
    };

    let user: User = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return Err(ApiError::Conflict(
                "Username or email already in use".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    };

    let token = create_session(&mut conn, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(IdentityResponse::new(user, token)),
    ))
}
