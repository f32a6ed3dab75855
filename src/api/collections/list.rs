use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::Collection;
use crate::schema::{collection_recipes, collections, recipes};

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CollectionRecipeSummary {
    pub id: i32,
    pub title: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionWithRecipes {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub recipes: Vec<CollectionRecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/collections",
    tag = "collections",
    responses(
        (status = 200, description = "Own collections with contained recipes", body = Vec<CollectionWithRecipes>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_collections(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<CollectionWithRecipes>>, ApiError> {
    let mut conn = pool.get()?;

    let owned: Vec<Collection> = collections::table
        .filter(collections::user_id.eq(user.id))
        .order(collections::created_at.desc())
        .select(Collection::as_select())
        .load(&mut conn)?;

    let ids: Vec<i32> = owned.iter().map(|c| c.id).collect();

    // One query for all memberships instead of one per collection.
    let memberships: Vec<(i32, CollectionRecipeSummary)> = collection_recipes::table
        .inner_join(recipes::table)
        .filter(collection_recipes::collection_id.eq_any(&ids))
        .select((
            collection_recipes::collection_id,
            CollectionRecipeSummary::as_select(),
        ))
        .load(&mut conn)?;

    let mut by_collection: HashMap<i32, Vec<CollectionRecipeSummary>> = HashMap::new();
    for (collection_id, summary) in memberships {
        by_collection.entry(collection_id).or_default().push(summary);
    }

    Ok(Json(
        owned
            .into_iter()
            .map(|c| CollectionWithRecipes {
                recipes: by_collection.remove(&c.id).unwrap_or_default(),
                id: c.id,
                name: c.name,
                description: c.description,
                created_at: c.created_at,
            })
            .collect(),
    ))
}
