use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Recipe};
use crate::schema::{recipes, users};

use super::RecipeWithAuthor;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe with author", body = RecipeWithAuthor),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeWithAuthor>, ApiError> {
    let mut conn = pool.get()?;

    let (recipe, author): (Recipe, Author) = recipes::table
        .inner_join(users::table)
        .filter(recipes::id.eq(id))
        .select((Recipe::as_select(), Author::as_select()))
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe"))?;

    Ok(Json(RecipeWithAuthor::from_parts(recipe, author)))
}
