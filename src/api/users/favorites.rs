use axum::extract::{Path, State};
use axum::Json;
use diesel::dsl::exists;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::NewFavorite;
use crate::schema::{favorites, recipes};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToggleFavoriteResponse {
    /// State after the toggle
    pub favorited: bool,
    pub message: String,
}

/// Toggle semantics: one endpoint both favorites and unfavorites depending
/// on the current edge. The read-then-write pair is not atomic against a
/// concurrent toggle from the same user; the junction primary key keeps the
/// race from ever duplicating the edge.
#[utoipa::path(
    post,
    path = "/api/users/favorites/{recipe_id}",
    tag = "users",
    params(
        ("recipe_id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = ToggleFavoriteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_favorite(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<ToggleFavoriteResponse>, ApiError> {
    let mut conn = pool.get()?;

    let recipe_exists: bool =
        diesel::select(exists(recipes::table.find(recipe_id))).get_result(&mut conn)?;
    if !recipe_exists {
        return Err(ApiError::NotFound("Recipe"));
    }

    let favorited: bool =
        diesel::select(exists(favorites::table.find((user.id, recipe_id))))
            .get_result(&mut conn)?;

    if favorited {
        diesel::delete(favorites::table.find((user.id, recipe_id))).execute(&mut conn)?;
        Ok(Json(ToggleFavoriteResponse {
            favorited: false,
            message: "Recipe removed from favorites".to_string(),
        }))
    } else {
        diesel::insert_into(favorites::table)
            .values(&NewFavorite {
                user_id: user.id,
                recipe_id,
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;
        Ok(Json(ToggleFavoriteResponse {
            favorited: true,
            message: "Recipe added to favorites".to_string(),
        }))
    }
}
