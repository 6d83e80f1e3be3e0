use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::post::{NewPost as DomainNewPost, Post as DomainPost};
use crate::domain::types::{PostContent, PostTitle, TypeConstraintError};

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub category_id: i32,
    pub publication_date: NaiveDate,
    pub content: String,
}

/// Insertable/patchable form of [`Post`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    pub title: String,
    pub category_id: i32,
    pub publication_date: NaiveDate,
    pub content: String,
}

impl TryFrom<Post> for DomainPost {
    type Error = TypeConstraintError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: post.id.try_into()?,
            title: PostTitle::new(post.title)?,
            category_id: post.category_id.try_into()?,
            category: None,
            publication_date: post.publication_date,
            content: PostContent::new(post.content)?,
        })
    }
}

impl From<DomainNewPost> for NewPost {
    fn from(post: DomainNewPost) -> Self {
        Self {
            title: post.title.into_inner(),
            category_id: post.category_id.get(),
            publication_date: post.publication_date,
            content: post.content.into_inner(),
        }
    }
}

impl From<&DomainPost> for NewPost {
    fn from(post: &DomainPost) -> Self {
        Self {
            title: post.title.as_str().to_string(),
            category_id: post.category_id.get(),
            publication_date: post.publication_date,
            content: post.content.as_str().to_string(),
        }
    }
}
