use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::recipes::delete::DeletedResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::schema::users;

/// Moderation view of a user. Password hash stays out of every projection.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "All users", body = Vec<UserSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    authz::admin_only(&authz::Actor::from(&user)).require()?;

    let mut conn = pool.get()?;

    let all: Vec<UserSummary> = users::table
        .order(users::created_at.desc())
        .select(UserSummary::as_select())
        .load(&mut conn)?;

    Ok(Json(all))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted with their recipes and reviews", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    authz::admin_only(&authz::Actor::from(&user)).require()?;

    let mut conn = pool.get()?;

    // Recipes, reviews, collections, sessions, and junction rows all cascade.
    let deleted = diesel::delete(users::table.find(id)).execute(&mut conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("User"));
    }

    Ok(Json(DeletedResponse {
        message: "User removed".to_string(),
    }))
}
