use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::schema::recipes;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
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
    let mut conn = pool.get()?;

    let owner_id: i32 = recipes::table
        .find(id)
        .select(recipes::user_id)
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe"))?;

    authz::owner_or_admin(&authz::Actor::from(&user), owner_id).require()?;

    // Reviews, favorites, and collection memberships go with it via cascades.
    diesel::delete(recipes::table.find(id)).execute(&mut conn)?;

    Ok(Json(DeletedResponse {
        message: "Recipe removed".to_string(),
    }))
}
