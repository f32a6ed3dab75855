use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use std::sync::Arc;

use crate::api::recipes::delete::DeletedResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::schema::collections;

#[utoipa::path(
    delete,
    path = "/api/collections/{id}",
    tag = "collections",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Collection not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_collection(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let mut conn = pool.get()?;

    let owner_id: i32 = collections::table
        .find(id)
        .select(collections::user_id)
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Collection"))?;

    authz::owner_only(&authz::Actor::from(&user), owner_id).require()?;

    diesel::delete(collections::table.find(id)).execute(&mut conn)?;

    Ok(Json(DeletedResponse {
        message: "Collection deleted".to_string(),
    }))
}
