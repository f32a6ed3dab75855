use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub bio: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: i32,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub instructions: String,
    pub cooking_time: i32,
    pub servings: i32,
    pub difficulty: String,
    pub dietary_tags: serde_json::Value,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: serde_json::Value,
    pub instructions: &'a str,
    pub cooking_time: i32,
    pub servings: i32,
    pub difficulty: &'a str,
    pub dietary_tags: serde_json::Value,
    pub image_url: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub user_id: i32,
    pub recipe_id: i32,
    pub rating: i32,
    pub comment: Option<&'a str>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Collection {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::collections)]
pub struct NewCollection<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    pub user_id: i32,
    pub recipe_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::follows)]
pub struct NewFollow {
    pub follower_id: i32,
    pub following_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::collection_recipes)]
pub struct NewCollectionRecipe {
    pub collection_id: i32,
    pub recipe_id: i32,
}

/// Public projection of a user attached to recipes and reviews.
#[derive(Queryable, Selectable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Author {
    pub id: i32,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Author {
            id: user.id,
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Recipe difficulty. Stored as text; unknown values are rejected at the
/// boundary by serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Decode a jsonb list column into strings, dropping anything malformed.
pub fn string_list(value: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_serde() {
        let d: Difficulty = serde_json::from_str("\"Easy\"").unwrap();
        assert_eq!(d, Difficulty::Easy);
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"Hard\"");
    }

    #[test]
    fn difficulty_rejects_unknown_values() {
        assert!(serde_json::from_str::<Difficulty>("\"Impossible\"").is_err());
    }

    #[test]
    fn string_list_decodes_json_array() {
        let v = serde_json::json!(["Vegan", "Gluten-Free"]);
        assert_eq!(string_list(&v), vec!["Vegan", "Gluten-Free"]);
    }

    #[test]
    fn string_list_tolerates_malformed_column() {
        assert!(string_list(&serde_json::json!({"not": "a list"})).is_empty());
        assert!(string_list(&serde_json::Value::Null).is_empty());
    }
}
