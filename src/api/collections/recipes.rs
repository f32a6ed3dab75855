use axum::extract::{Path, State};
use axum::Json;
use diesel::dsl::exists;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{NewCollectionRecipe, User};
use crate::schema::{collection_recipes, collections, recipes};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddRecipeRequest {
    pub recipe_id: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionEditResponse {
    pub message: String,
}

/// Owner check shared by both membership mutations. Collections have no
/// admin override.
fn ensure_collection_owner(
    conn: &mut PgConnection,
    collection_id: i32,
    user: &User,
) -> Result<(), ApiError> {
    let owner_id: i32 = collections::table
        .find(collection_id)
        .select(collections::user_id)
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Collection"))?;

    authz::owner_only(&authz::Actor::from(user), owner_id).require()
}

#[utoipa::path(
    post,
    path = "/api/collections/{id}/recipes",
    tag = "collections",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    request_body = AddRecipeRequest,
    responses(
        (status = 200, description = "Recipe added (idempotent)", body = CollectionEditResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Collection or recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(collection_id): Path<i32>,
    Json(req): Json<AddRecipeRequest>,
) -> Result<Json<CollectionEditResponse>, ApiError> {
    let mut conn = pool.get()?;

    ensure_collection_owner(&mut conn, collection_id, &user)?;

    let recipe_exists: bool =
        diesel::select(exists(recipes::table.find(req.recipe_id))).get_result(&mut conn)?;
    if !recipe_exists {
        return Err(ApiError::NotFound("Recipe"));
    }

    // Re-adding an existing member is a no-op, not an error.
    diesel::insert_into(collection_recipes::table)
        .values(&NewCollectionRecipe {
            collection_id,
            recipe_id: req.recipe_id,
        })
        .on_conflict_do_nothing()
        .execute(&mut conn)?;

    Ok(Json(CollectionEditResponse {
        message: "Recipe added to collection".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/collections/{id}/recipes/{recipe_id}",
    tag = "collections",
    params(
        ("id" = i32, Path, description = "Collection ID"),
        ("recipe_id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe removed (no-op when absent)", body = CollectionEditResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Collection or recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path((collection_id, recipe_id)): Path<(i32, i32)>,
) -> Result<Json<CollectionEditResponse>, ApiError> {
    let mut conn = pool.get()?;

    ensure_collection_owner(&mut conn, collection_id, &user)?;

    let recipe_exists: bool =
        diesel::select(exists(recipes::table.find(recipe_id))).get_result(&mut conn)?;
    if !recipe_exists {
        return Err(ApiError::NotFound("Recipe"));
    }

    diesel::delete(collection_recipes::table.find((collection_id, recipe_id)))
        .execute(&mut conn)?;

    Ok(Json(CollectionEditResponse {
        message: "Recipe removed from collection".to_string(),
    }))
}
