pub mod create;
pub mod delete;
pub mod list;
pub mod recipes;

use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Returns the router for /api/collections endpoints (mounted at /api/collections)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_collections).post(create::create_collection),
        )
        .route("/{id}", delete(delete::delete_collection))
        .route("/{id}/recipes", post(recipes::add_recipe))
        .route(
            "/{id}/recipes/{recipe_id}",
            delete(recipes::remove_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_collection,
        list::list_collections,
        delete::delete_collection,
        recipes::add_recipe,
        recipes::remove_recipe,
    ),
    components(schemas(
        create::CreateCollectionRequest,
        create::CollectionResponse,
        list::CollectionWithRecipes,
        list::CollectionRecipeSummary,
        recipes::AddRecipeRequest,
        recipes::CollectionEditResponse,
    ))
)]
pub struct ApiDoc;
