use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Collection, NewCollection};
use crate::schema::collections;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        CollectionResponse {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            description: c.description,
            created_at: c.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/collections",
    tag = "collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection created", body = CollectionResponse),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_collection(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<CreateCollectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Collection name cannot be empty".to_string(),
        ));
    }

    let mut conn = pool.get()?;

    let collection: Collection = diesel::insert_into(collections::table)
        .values(&NewCollection {
            user_id: user.id,
            name: req.name.trim(),
            description: req.description.as_deref(),
        })
        .returning(Collection::as_returning())
        .get_result(&mut conn)?;

    Ok((
        StatusCode::CREATED,
        Json(CollectionResponse::from(collection)),
    ))
}
