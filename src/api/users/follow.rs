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
use crate::models::NewFollow;
use crate::schema::{follows, users};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToggleFollowResponse {
    /// State after the toggle
    pub following: bool,
    pub message: String,
}

/// Toggle semantics, same caveat as favorites: the existence check and the
/// write are two statements, and the composite primary key absorbs a
/// concurrent duplicate.
#[utoipa::path(
    post,
    path = "/api/users/{id}/follow",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID to follow or unfollow")
    ),
    responses(
        (status = 200, description = "Follow toggled", body = ToggleFollowResponse),
        (status = 400, description = "Attempted to follow yourself", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_follow(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(target_id): Path<i32>,
) -> Result<Json<ToggleFollowResponse>, ApiError> {
    if target_id == user.id {
        return Err(ApiError::InvalidOperation(
            "You cannot follow yourself".to_string(),
        ));
    }

    let mut conn = pool.get()?;

    let target_exists: bool =
        diesel::select(exists(users::table.find(target_id))).get_result(&mut conn)?;
    if !target_exists {
        return Err(ApiError::NotFound("User"));
    }

    let following: bool =
        diesel::select(exists(follows::table.find((user.id, target_id))))
            .get_result(&mut conn)?;

    if following {
        diesel::delete(follows::table.find((user.id, target_id))).execute(&mut conn)?;
        Ok(Json(ToggleFollowResponse {
            following: false,
            message: "User unfollowed".to_string(),
        }))
    } else {
        diesel::insert_into(follows::table)
            .values(&NewFollow {
                follower_id: user.id,
                following_id: target_id,
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;
        Ok(Json(ToggleFollowResponse {
            following: true,
            message: "User followed".to_string(),
        }))
    }
}
