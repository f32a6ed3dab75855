use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Difficulty, Recipe};
use crate::schema::{recipes, users};

use super::RecipeWithAuthor;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub dietary_tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = recipes)]
struct RecipeChanges<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    ingredients: Option<serde_json::Value>,
    instructions: Option<&'a str>,
    cooking_time: Option<i32>,
    servings: Option<i32>,
    difficulty: Option<&'a str>,
    dietary_tags: Option<serde_json::Value>,
    image_url: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Updated recipe with author", body = RecipeWithAuthor),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeWithAuthor>, ApiError> {
    if let Some(ref title) = req.title {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("Title cannot be empty".to_string()));
        }
    }
    if let Some(ref description) = req.description {
        if description.trim().is_empty() {
            return Err(ApiError::Validation(
                "Description cannot be empty".to_string(),
            ));
        }
    }
    if let Some(ref instructions) = req.instructions {
        if instructions.trim().is_empty() {
            return Err(ApiError::Validation(
                "Instructions cannot be empty".to_string(),
            ));
        }
    }
    if req.cooking_time.is_some_and(|t| t <= 0) {
        return Err(ApiError::Validation(
            "Cooking time must be a positive number of minutes".to_string(),
        ));
    }
    if req.servings.is_some_and(|s| s <= 0) {
        return Err(ApiError::Validation(
            "Servings must be a positive number".to_string(),
        ));
    }

    let mut conn = pool.get()?;

    let owner_id: i32 = recipes::table
        .find(id)
        .select(recipes::user_id)
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe"))?;

    authz::owner_or_admin(&authz::Actor::from(&user), owner_id).require()?;

    let changes = RecipeChanges {
        title: req.title.as_deref().map(str::trim),
        description: req.description.as_deref(),
        ingredients: req.ingredients.as_ref().map(|i| serde_json::json!(i)),
        instructions: req.instructions.as_deref(),
        cooking_time: req.cooking_time,
        servings: req.servings,
        difficulty: req.difficulty.map(Difficulty::as_str),
        dietary_tags: req.dietary_tags.as_ref().map(|t| serde_json::json!(t)),
        image_url: req.image_url.as_deref(),
        updated_at: Utc::now(),
    };

    let recipe: Recipe = diesel::update(recipes::table.find(id))
        .set(&changes)
        .returning(Recipe::as_returning())
        .get_result(&mut conn)?;

    let author: Author = users::table
        .find(recipe.user_id)
        .select(Author::as_select())
        .first(&mut conn)?;

    Ok(Json(RecipeWithAuthor::from_parts(recipe, author)))
}
