use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use crate::api::recipes::RecipeWithAuthor;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Recipe};
use crate::schema::{follows, recipes, users};

/// Recipes authored by the users the caller follows, newest first. The
/// caller is never in their own following set, so their own recipes never
/// appear here.
#[utoipa::path(
    get,
    path = "/api/users/feed",
    tag = "users",
    responses(
        (status = 200, description = "Feed of followed authors' recipes", body = Vec<RecipeWithAuthor>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_feed(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<RecipeWithAuthor>>, ApiError> {
    let mut conn = pool.get()?;

    let rows: Vec<(Recipe, Author)> = recipes::table
        .inner_join(users::table)
        .filter(
            recipes::user_id.eq_any(
                follows::table
                    .filter(follows::follower_id.eq(user.id))
                    .select(follows::following_id),
            ),
        )
        .order(recipes::created_at.desc())
        .select((Recipe::as_select(), Author::as_select()))
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(recipe, author)| RecipeWithAuthor::from_parts(recipe, author))
            .collect(),
    ))
}
