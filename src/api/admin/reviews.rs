use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::recipes::delete::DeletedResponse;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::authz;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Review};
use crate::schema::{recipes, reviews, users};

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewedRecipe {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminReviewEntry {
    pub id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewer: Author,
    pub recipe: ReviewedRecipe,
}

#[utoipa::path(
    get,
    path = "/api/admin/reviews",
    tag = "admin",
    responses(
        (status = 200, description = "All reviews, newest first", body = Vec<AdminReviewEntry>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reviews(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<AdminReviewEntry>>, ApiError> {
    authz::admin_only(&authz::Actor::from(&user)).require()?;

    let mut conn = pool.get()?;

    let rows: Vec<(Review, Author, ReviewedRecipe)> = reviews::table
        .inner_join(users::table)
        .inner_join(recipes::table)
        .order(reviews::created_at.desc())
        .select((
            Review::as_select(),
            Author::as_select(),
            ReviewedRecipe::as_select(),
        ))
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(review, reviewer, recipe)| AdminReviewEntry {
                id: review.id,
                rating: review.rating,
                comment: review.comment,
                created_at: review.created_at,
                reviewer,
                recipe,
            })
            .collect(),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/reviews/{id}",
    tag = "admin",
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = DeletedResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_review(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    authz::admin_only(&authz::Actor::from(&user)).require()?;

    let mut conn = pool.get()?;

    let deleted = diesel::delete(reviews::table.find(id)).execute(&mut conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Review"));
    }

    Ok(Json(DeletedResponse {
        message: "Review removed by admin".to_string(),
    }))
}
