use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::schema::{recipes, users};

/// Card-sized recipe projection for profile pages.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub image_url: Option<String>,
    pub cooking_time: i32,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

/// What any visitor may see about a user. No email.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicProfileResponse {
    #[serde(flatten)]
    pub user: PublicUser,
    pub recipes: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/public",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Public profile", body = PublicProfileResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_public_profile(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<PublicProfileResponse>, ApiError> {
    let mut conn = pool.get()?;

    let user: PublicUser = users::table
        .find(id)
        .select(PublicUser::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("User"))?;

    let authored: Vec<RecipeSummary> = recipes::table
        .filter(recipes::user_id.eq(id))
        .order(recipes::created_at.desc())
        .select(RecipeSummary::as_select())
        .load(&mut conn)?;

    Ok(Json(PublicProfileResponse {
        user,
        recipes: authored,
    }))
}
