use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, NewReview, Review};
use crate::rating::{self, StarDisplay};
use crate::schema::{recipes, reviews, users};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    /// Stars, 1 to 5
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewWithReviewer {
    pub id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewer: Author,
}

impl ReviewWithReviewer {
    fn from_parts(review: Review, reviewer: Author) -> Self {
        ReviewWithReviewer {
            id: review.id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            reviewer,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewWithReviewer>,
    pub average_rating: f64,
    pub stars: StarDisplay,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/reviews",
    tag = "reviews",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Reviews in creation order with aggregate rating", body = ReviewsResponse)
    )
)]
pub async fn list_reviews(
    State(pool): State<Arc<DbPool>>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let mut conn = pool.get()?;

    let rows: Vec<(Review, Author)> = reviews::table
        .inner_join(users::table)
        .filter(reviews::recipe_id.eq(recipe_id))
        .order(reviews::created_at.asc())
        .select((Review::as_select(), Author::as_select()))
        .load(&mut conn)?;

    let ratings: Vec<i32> = rows.iter().map(|(review, _)| review.rating).collect();
    let average_rating = rating::average(&ratings);

    Ok(Json(ReviewsResponse {
        reviews: rows
            .into_iter()
            .map(|(review, reviewer)| ReviewWithReviewer::from_parts(review, reviewer))
            .collect(),
        average_rating,
        stars: rating::stars(average_rating),
    }))
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/reviews",
    tag = "reviews",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = AddReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewWithReviewer),
        (status = 400, description = "Missing or out-of-range rating", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Recipe already reviewed by this user", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_review(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(recipe_id): Path<i32>,
    Json(req): Json<AddReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rating = req
        .rating
        .ok_or_else(|| ApiError::Validation("Rating is required".to_string()))?;
    if !(1..=5).contains(&rating) {
        return Err(ApiError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let mut conn = pool.get()?;

    let recipe_exists: bool =
        diesel::select(exists(recipes::table.find(recipe_id))).get_result(&mut conn)?;
    if !recipe_exists {
        return Err(ApiError::NotFound("Recipe"));
    }

    // Check-then-insert; the unique index on (user_id, recipe_id) backstops
    // a concurrent duplicate submission.
    let already_reviewed: bool = diesel::select(exists(
        reviews::table
            .filter(reviews::user_id.eq(user.id))
            .filter(reviews::recipe_id.eq(recipe_id)),
    ))
    .get_result(&mut conn)?;
    if already_reviewed {
        return Err(ApiError::Conflict(
            "You have already reviewed this recipe".to_string(),
        ));
    }

    let new_review = NewReview {
        user_id: user.id,
        recipe_id,
        rating,
        comment: req.comment.as_deref(),
    };

    let review: Review = match diesel::insert_into(reviews::table)
        .values(&new_review)
        .returning(Review::as_returning())
        .get_result(&mut conn)
    {
        Ok(r) => r,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return Err(ApiError::Conflict(
                "You have already reviewed this recipe".to_string(),
            ))
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(ReviewWithReviewer::from_parts(review, Author::from(&user))),
    ))
}
