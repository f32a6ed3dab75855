use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Difficulty, NewRecipe, Recipe};
use crate::schema::recipes;

use super::RecipeWithAuthor;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Minutes
    pub cooking_time: i32,
    pub servings: i32,
    pub difficulty: Option<Difficulty>,
    pub dietary_tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeWithAuthor),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("Title cannot be empty".to_string()));
    }
    if req.description.trim().is_empty() {
        return Err(ApiError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }
    if req.instructions.trim().is_empty() {
        return Err(ApiError::Validation(
            "Instructions cannot be empty".to_string(),
        ));
    }
    if req.cooking_time <= 0 {
        return Err(ApiError::Validation(
            "Cooking time must be a positive number of minutes".to_string(),
        ));
    }
    if req.servings <= 0 {
        return Err(ApiError::Validation(
            "Servings must be a positive number".to_string(),
        ));
    }

    let mut conn = pool.get()?;

    let new_recipe = NewRecipe {
        user_id: user.id,
        title: req.title.trim(),
        description: &req.description,
        ingredients: serde_json::json!(req.ingredients),
        instructions: &req.instructions,
        cooking_time: req.cooking_time,
        servings: req.servings,
        difficulty: req.difficulty.unwrap_or(Difficulty::Medium).as_str(),
        dietary_tags: serde_json::json!(req.dietary_tags.unwrap_or_default()),
        image_url: req.image_url.as_deref(),
    };

    let recipe: Recipe = diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(Recipe::as_returning())
        .get_result(&mut conn)?;

    let author = Author::from(&user);

    Ok((
        StatusCode::CREATED,
        Json(RecipeWithAuthor::from_parts(recipe, author)),
    ))
}
