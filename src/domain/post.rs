use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, PostContent, PostId, PostTitle};

/// A published blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub category_id: CategoryId,
    /// Related category, only present when the read asked to include it.
    pub category: Option<Category>,
    pub publication_date: NaiveDate,
    pub content: PostContent,
}

/// Information required to create a new [`Post`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub category_id: CategoryId,
    pub publication_date: NaiveDate,
    pub content: PostContent,
}

impl NewPost {
    /// Turn the staged insert into a stored post once the store assigned an id.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            category_id: self.category_id,
            category: None,
            publication_date: self.publication_date,
            content: self.content,
        }
    }
}
