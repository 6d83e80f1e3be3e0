//! Request-scoped persistence gateway.
//!
//! A [`UnitOfWork`] stages inserts, overwrites and deletions in memory and
//! flushes them to the store in one transaction on [`UnitOfWork::save`].
//! One instance is created per incoming request and dropped with it.

use crate::domain::category::{Category, NewCategory};
use crate::domain::post::{NewPost, Post};
use crate::domain::types::{CategoryId, PostId};
use crate::repository::{
    CategoryReader, Change, ChangeWriter, PostReader, RepositoryResult, Saved,
};

pub struct UnitOfWork<R> {
    repo: R,
    staged: Vec<Change>,
}

impl<R> UnitOfWork<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            staged: Vec::new(),
        }
    }

    /// Underlying repository, for queries.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Changes waiting for the next [`UnitOfWork::save`].
    pub fn staged(&self) -> &[Change] {
        &self.staged
    }

    /// Stage an insert. The id is assigned when the change is saved.
    pub fn add_category(&mut self, category: NewCategory) {
        self.staged.push(Change::AddCategory(category));
    }

    /// Stage a full-row overwrite of an existing category.
    pub fn update_category(&mut self, category: Category) {
        self.staged.push(Change::UpdateCategory(category));
    }

    /// Stage a deletion. The category's posts are removed with it.
    pub fn remove_category(&mut self, id: CategoryId) {
        self.staged.push(Change::RemoveCategory(id));
    }

    pub fn add_post(&mut self, post: NewPost) {
        self.staged.push(Change::AddPost(post));
    }

    pub fn update_post(&mut self, post: Post) {
        self.staged.push(Change::UpdatePost(post));
    }

    pub fn remove_post(&mut self, id: PostId) {
        self.staged.push(Change::RemovePost(id));
    }
}

impl<R: ChangeWriter> UnitOfWork<R> {
    /// Commit every staged change in one round trip.
    ///
    /// The staging area is emptied whether or not the commit succeeds; a
    /// failed commit leaves the store untouched.
    pub fn save(&mut self) -> RepositoryResult<Vec<Saved>> {
        if self.staged.is_empty() {
            return Ok(Vec::new());
        }
        let changes = std::mem::take(&mut self.staged);
        self.repo.save_changes(&changes)
    }
}

impl<R: CategoryReader> UnitOfWork<R> {
    pub fn find_category(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        self.repo.get_category_by_id(id)
    }
}

impl<R: PostReader> UnitOfWork<R> {
    pub fn find_post(
        &self,
        id: PostId,
        include_category: bool,
    ) -> RepositoryResult<Option<Post>> {
        self.repo.get_post_by_id(id, include_category)
    }
}
