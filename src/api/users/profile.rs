use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::recipes::{RecipeData, RecipeWithAuthor};
use crate::api::ErrorResponse;
use crate::auth::{hash_password, AuthUser};
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Recipe, User};
use crate::schema::{favorites, follows, recipes, users};

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FollowedUser {
    pub id: i32,
    pub username: String,
}

/// Everything the profile page needs in one call: own recipes, favorites
/// with their authors, and the users being followed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub recipes: Vec<RecipeData>,
    pub favorite_recipes: Vec<RecipeWithAuthor>,
    pub following: Vec<FollowedUser>,
}

#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "users",
    responses(
        (status = 200, description = "Own profile aggregate", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let mut conn = pool.get()?;

    let own_recipes: Vec<Recipe> = recipes::table
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(&mut conn)?;

    let favorite_rows: Vec<(Recipe, Author)> = favorites::table
        .inner_join(recipes::table.inner_join(users::table))
        .filter(favorites::user_id.eq(user.id))
        .order(favorites::created_at.desc())
        .select((Recipe::as_select(), Author::as_select()))
        .load(&mut conn)?;

    let following: Vec<FollowedUser> = users::table
        .filter(
            users::id.eq_any(
                follows::table
                    .filter(follows::follower_id.eq(user.id))
                    .select(follows::following_id),
            ),
        )
        .select(FollowedUser::as_select())
        .load(&mut conn)?;

    Ok(Json(ProfileResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        bio: user.bio,
        avatar_url: user.avatar_url,
        role: user.role,
        created_at: user.created_at,
        recipes: own_recipes.into_iter().map(RecipeData::from).collect(),
        favorite_recipes: favorite_rows
            .into_iter()
            .map(|(recipe, author)| RecipeWithAuthor::from_parts(recipe, author))
            .collect(),
        following,
    }))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateProfileResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// The bearer token the request was made with; it stays valid.
    pub token: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserChanges<'a> {
    username: Option<&'a str>,
    email: Option<&'a str>,
    bio: Option<&'a str>,
    avatar_url: Option<&'a str>,
    password_hash: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UpdateProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Username or email already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    if let Some(ref username) = req.username {
        if username.trim().is_empty() {
            return Err(ApiError::Validation("Username cannot be empty".to_string()));
        }
    }
    if let Some(ref email) = req.email {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(ApiError::Validation("A valid email is required".to_string()));
        }
    }

    let mut conn = pool.get()?;

    let password_hash = match req.password.as_deref() {
        Some(p) if !p.is_empty() => Some(
            hash_password(p)
                .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?,
        ),
        _ => None,
    };

    let changes = UserChanges {
        username: req.username.as_deref().map(str::trim),
        email: req.email.as_deref().map(str::trim),
        bio: req.bio.as_deref(),
        avatar_url: req.avatar_url.as_deref(),
        password_hash: password_hash.as_deref(),
        updated_at: Utc::now(),
    };

    let updated: User = match diesel::update(users::table.find(user.id))
        .set(&changes)
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

    // The extractor already validated the header, so this always succeeds.
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();

    Ok(Json(UpdateProfileResponse {
        id: updated.id,
        username: updated.username,
        email: updated.email,
        bio: updated.bio,
        avatar_url: updated.avatar_url,
        token,
    }))
}
