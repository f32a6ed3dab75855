pub mod favorites;
pub mod feed;
pub mod follow;
pub mod profile;
pub mod public_profile;

use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/feed", get(feed::get_feed))
        .route("/{id}/public", get(public_profile::get_public_profile))
        .route("/{id}/follow", post(follow::toggle_follow))
        .route("/favorites/{recipe_id}", post(favorites::toggle_favorite))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        profile::get_profile,
        profile::update_profile,
        public_profile::get_public_profile,
        favorites::toggle_favorite,
        follow::toggle_follow,
        feed::get_feed,
    ),
    components(schemas(
        profile::ProfileResponse,
        profile::FollowedUser,
        profile::UpdateProfileRequest,
        profile::UpdateProfileResponse,
        public_profile::PublicProfileResponse,
        public_profile::PublicUser,
        public_profile::RecipeSummary,
        favorites::ToggleFavoriteResponse,
        follow::ToggleFollowResponse,
    ))
)]
pub struct ApiDoc;
