use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::post::Post;
use crate::dto::categories::CategoryDto;
use crate::forms::posts::PostInput;

/// A post as returned by the API. `category` is filled on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i32,
    pub title: String,
    pub category_id: i32,
    pub category: Option<CategoryDto>,
    pub publication_date: NaiveDate,
    pub content: String,
}

impl From<Post> for PostDto {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            category_id: value.category_id.get(),
            category: value.category.map(CategoryDto::from),
            publication_date: value.publication_date,
            content: value.content.into_inner(),
        }
    }
}

/// Body of `POST /api/Post`. Dates are `YYYY-MM-DD` or an ISO 8601 timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub category_id: Option<i32>,
    pub publication_date: Option<String>,
    pub content: Option<String>,
}

impl From<CreatePostRequest> for PostInput {
    fn from(value: CreatePostRequest) -> Self {
        Self {
            id: 0,
            title: value.title.unwrap_or_default(),
            category_id: value.category_id,
            publication_date: value.publication_date,
            content: value.content.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /api/Post/{id}`. `id` must repeat the route id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostRequest {
    pub id: i32,
    pub title: Option<String>,
    pub category_id: Option<i32>,
    pub publication_date: Option<String>,
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostInput {
    fn from(value: UpdatePostRequest) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
            category_id: value.category_id,
            publication_date: value.publication_date,
            content: value.content.unwrap_or_default(),
        }
    }
}
