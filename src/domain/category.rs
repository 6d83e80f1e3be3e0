use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryTitle};

/// A blog category. Posts reference it through `Post::category_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub title: CategoryTitle,
}

/// Data required to insert a new [`Category`]. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub title: CategoryTitle,
}
