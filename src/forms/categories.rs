use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryTitle};
use crate::forms::{FieldErrors, TITLE, TITLE_REQUIRED};

/// Fields a category create or update carries, whatever surface it came from.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CategoryInput {
    /// Zero for creates.
    pub id: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
}

/// Validated category fields, ready to be staged.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPayload {
    pub title: CategoryTitle,
}

impl CategoryPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory { title: self.title }
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            title: self.title,
        }
    }
}

impl TryFrom<CategoryInput> for CategoryPayload {
    type Error = FieldErrors;

    fn try_from(value: CategoryInput) -> Result<Self, Self::Error> {
        let mut errors = value
            .validate()
            .err()
            .map(FieldErrors::from)
            .unwrap_or_default();
        let title = errors.check(TITLE, TITLE_REQUIRED, CategoryTitle::new(value.title));

        match title {
            Some(title) if errors.is_empty() => Ok(Self { title }),
            _ => Err(errors),
        }
    }
}

/// `POST /Category/Create`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddCategoryForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub title: String,
}

impl From<AddCategoryForm> for CategoryInput {
    fn from(value: AddCategoryForm) -> Self {
        Self {
            id: 0,
            title: value.title,
        }
    }
}

/// `POST /Category/Edit/{id}`. The hidden `id` must match the route.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EditCategoryForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
}

impl From<EditCategoryForm> for CategoryInput {
    fn from(value: EditCategoryForm) -> Self {
        Self {
            id: value.id,
            title: value.title,
        }
    }
}

impl From<&Category> for EditCategoryForm {
    fn from(value: &Category) -> Self {
        Self {
            csrf_token: String::new(),
            id: value.id.get(),
            title: value.title.as_str().to_string(),
        }
    }
}

/// `POST /Category/DeleteConfirmed/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeleteCategoryForm {
    #[serde(default)]
    pub csrf_token: String,
}
