use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::category::Category;
use crate::forms::categories::CategoryInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i32,
    pub title: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
        }
    }
}

/// Body of `POST /api/Category`. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCategoryRequest {
    pub title: Option<String>,
}

impl From<CreateCategoryRequest> for CategoryInput {
    fn from(value: CreateCategoryRequest) -> Self {
        Self {
            id: 0,
            title: value.title.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /api/Category/{id}`. `id` must repeat the route id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCategoryRequest {
    pub id: i32,
    pub title: Option<String>,
}

impl From<UpdateCategoryRequest> for CategoryInput {
    fn from(value: UpdateCategoryRequest) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
        }
    }
}
