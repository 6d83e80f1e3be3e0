use diesel::Connection;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::post::{NewPost, Post};
use crate::domain::types::{CategoryId, PostId};

pub mod category;
pub mod errors;
pub mod post;
pub mod unit_of_work;

pub use errors::{RepositoryError, RepositoryResult};
pub use unit_of_work::UnitOfWork;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    /// Restrict to posts of one category.
    pub category_id: Option<CategoryId>,
    /// Eagerly attach the related category to every post.
    pub include_category: bool,
}

impl PostListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn include_category(mut self) -> Self {
        self.include_category = true;
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category in creation order.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Check whether a category row exists.
    fn category_exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        Ok(self.get_category_by_id(id)?.is_some())
    }
}

/// Read-only operations for post entities.
pub trait PostReader {
    /// List posts matching the supplied query, in creation order.
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<Vec<Post>>;
    /// Retrieve a post by its identifier, optionally with its category attached.
    fn get_post_by_id(&self, id: PostId, include_category: bool)
    -> RepositoryResult<Option<Post>>;
    /// Check whether a post row exists.
    fn post_exists(&self, id: PostId) -> RepositoryResult<bool> {
        Ok(self.get_post_by_id(id, false)?.is_some())
    }
}

/// A mutation staged in a [`UnitOfWork`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    AddCategory(NewCategory),
    UpdateCategory(Category),
    RemoveCategory(CategoryId),
    AddPost(NewPost),
    UpdatePost(Post),
    RemovePost(PostId),
}

/// Outcome of one applied [`Change`], in the order the changes were staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    /// Inserted category with its store-assigned id.
    Category(Category),
    /// Inserted post with its store-assigned id.
    Post(Post),
    Updated,
    Removed,
}

impl Saved {
    pub fn into_category(self) -> Option<Category> {
        match self {
            Self::Category(category) => Some(category),
            _ => None,
        }
    }

    pub fn into_post(self) -> Option<Post> {
        match self {
            Self::Post(post) => Some(post),
            _ => None,
        }
    }
}

/// Write side of the persistence gateway.
pub trait ChangeWriter {
    /// Apply all changes atomically.
    ///
    /// An update or removal matching no row fails the whole batch with
    /// [`RepositoryError::Conflict`] and nothing is persisted.
    fn save_changes(&self, changes: &[Change]) -> RepositoryResult<Vec<Saved>>;
}

impl ChangeWriter for DieselRepository {
    fn save_changes(&self, changes: &[Change]) -> RepositoryResult<Vec<Saved>> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            changes
                .iter()
                .map(|change| match change {
                    Change::AddCategory(new_category) => {
                        category::insert_category(conn, new_category).map(Saved::Category)
                    }
                    Change::UpdateCategory(existing) => {
                        category::overwrite_category(conn, existing).map(|_| Saved::Updated)
                    }
                    Change::RemoveCategory(id) => {
                        category::remove_category(conn, *id).map(|_| Saved::Removed)
                    }
                    Change::AddPost(new_post) => post::insert_post(conn, new_post).map(Saved::Post),
                    Change::UpdatePost(existing) => {
                        post::overwrite_post(conn, existing).map(|_| Saved::Updated)
                    }
                    Change::RemovePost(id) => post::remove_post(conn, *id).map(|_| Saved::Removed),
                })
                .collect()
        })
    }
}
