use axum::extract::{Query, State};
use axum::Json;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Author, Difficulty, Recipe};
use crate::schema::{recipes, users};

use super::RecipeWithAuthor;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring matched against title, description,
    /// author username, and the tag list
    pub keyword: Option<String>,
    /// Exact difficulty
    pub difficulty: Option<Difficulty>,
    /// Maximum cooking time in minutes
    pub time: Option<i32>,
    /// Recipe must carry exactly this dietary tag
    pub dietary: Option<String>,
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like(s))
}

/// Tags are stored as a serialized JSON list, so an exact-tag match looks for
/// the tag bounded by quote characters. "Vegan" must not match "Vegan-ish".
fn exact_tag_pattern(tag: &str) -> String {
    format!("%\"{}\"%", escape_like(tag))
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes, newest first", body = Vec<RecipeWithAuthor>),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeWithAuthor>>, ApiError> {
    let mut conn = pool.get()?;

    let mut query = recipes::table.inner_join(users::table).into_boxed();

    if let Some(keyword) = params.keyword.as_deref().map(str::trim) {
        if !keyword.is_empty() {
            let pattern = contains_pattern(keyword);
            query = query.filter(
                recipes::title
                    .ilike(pattern.clone())
                    .or(recipes::description.ilike(pattern.clone()))
                    .or(users::username.ilike(pattern.clone()))
                    .or(sql::<Bool>("recipes.dietary_tags::text ILIKE ")
                        .bind::<Text, _>(pattern)),
            );
        }
    }

    if let Some(difficulty) = params.difficulty {
        query = query.filter(recipes::difficulty.eq(difficulty.as_str()));
    }

    if let Some(time) = params.time {
        query = query.filter(recipes::cooking_time.le(time));
    }

    if let Some(dietary) = params.dietary.as_deref().map(str::trim) {
        if !dietary.is_empty() {
            query = query.filter(
                sql::<Bool>("recipes.dietary_tags::text LIKE ")
                    .bind::<Text, _>(exact_tag_pattern(dietary)),
            );
        }
    }

    let rows: Vec<(Recipe, Author)> = query
        .order(recipes::created_at.desc())
        .select((Recipe::as_select(), Author::as_select()))
        .load(&mut conn)?;

    Ok(Json(
        rows.into_iter()
            .map(|(recipe, author)| RecipeWithAuthor::from_parts(recipe, author))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_in_wildcards() {
        assert_eq!(contains_pattern("pasta"), "%pasta%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn exact_tag_pattern_is_quote_bounded() {
        // The closing quote keeps "Vegan" from matching "Vegan-ish".
        assert_eq!(exact_tag_pattern("Vegan"), "%\"Vegan\"%");
    }

    #[test]
    fn exact_tag_pattern_escapes_metacharacters() {
        assert_eq!(exact_tag_pattern("100%_Raw"), "%\"100\\%\\_Raw\"%");
    }
}
