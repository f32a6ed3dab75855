use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use crate::api::recipes::delete::DeletedResponse;
use crate::api::recipes::RecipeWithAuthor;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Recipe};
use crate::schema::{recipes, users};

#[utoipa::path(
    get,
    path = "/api/admin/recipes",
    tag = "admin",
    responses(
        (status = 200, description = "All recipes, newest first", body = Vec<RecipeWithAuthor>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<RecipeWithAuthor>>, ApiError> {
    authz::admin_only(&authz::Actor::from(&user)).require()?;

    let mut conn = pool.get()?;

    let rows: Vec<(Recipe, Author)> = recipes::table
        .inner_join(users::table)
        .order(recipes::created_at.desc())
        .select((Recipe::as_select(), Author::as_select()))
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(recipe, author)| RecipeWithAuthor::from_parts(recipe, author))
            .collect(),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/recipes/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    authz::admin_only(&authz::Actor::from(&user)).require()?;

    let mut conn = pool.get()?;

    let deleted = diesel::delete(recipes::table.find(id)).execute(&mut conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Recipe"));
    }

    Ok(Json(DeletedResponse {
        message: "Recipe removed by admin".to_string(),
    }))
}
