pub mod recipes;
pub mod reviews;
pub mod users;

use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Returns the router for /api/admin endpoints (mounted at /api/admin).
/// Every handler here passes through the admin-only authorization gate.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{id}", delete(users::delete_user))
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipes/{id}", delete(recipes::delete_recipe))
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews/{id}", delete(reviews::delete_review))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::delete_user,
        recipes::list_recipes,
        recipes::delete_recipe,
        reviews::list_reviews,
        reviews::delete_review,
    ),
    components(schemas(
        users::UserSummary,
        reviews::AdminReviewEntry,
        reviews::ReviewedRecipe,
    ))
)]
pub struct ApiDoc;
