pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reviews;
pub mod update;

use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::models::{string_list, Author, Recipe};
use crate::AppState;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::search_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{id}/reviews",
            get(reviews::list_reviews).post(reviews::add_review),
        )
}

/// Flat JSON projection of a recipe row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeData {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub difficulty: String,
    pub dietary_tags: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeData {
    fn from(r: Recipe) -> Self {
        RecipeData {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            description: r.description,
            ingredients: string_list(&r.ingredients),
            instructions: r.instructions,
            cooking_time: r.cooking_time,
            servings: r.servings,
            difficulty: r.difficulty,
            dietary_tags: string_list(&r.dietary_tags),
            image_url: r.image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Recipe with its author eager-loaded, the shape most list endpoints return.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeWithAuthor {
    #[serde(flatten)]
    pub recipe: RecipeData,
    pub author: Author,
}

impl RecipeWithAuthor {
    pub fn from_parts(recipe: Recipe, author: Author) -> Self {
        RecipeWithAuthor {
            recipe: recipe.into(),
            author,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::search_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        reviews::list_reviews,
        reviews::add_review,
    ),
    components(schemas(
        RecipeData,
        RecipeWithAuthor,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        reviews::AddReviewRequest,
        reviews::ReviewWithReviewer,
        reviews::ReviewsResponse,
        delete::DeletedResponse,
    ))
)]
pub struct ApiDoc;
