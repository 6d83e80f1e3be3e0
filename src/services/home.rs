use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::post::Post;
use crate::repository::{CategoryReader, PostListQuery, PostReader, UnitOfWork};

use super::{ServiceResult, store_failure};

/// What the admin landing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub categories: Vec<Category>,
    /// Every post with its category attached.
    pub posts: Vec<Post>,
}

pub fn show_overview<R>(uow: &UnitOfWork<R>) -> ServiceResult<Overview>
where
    R: CategoryReader + PostReader,
{
    let categories = uow
        .repo()
        .list_categories()
        .map_err(|e| store_failure("list categories", e))?;
    let posts = uow
        .repo()
        .list_posts(PostListQuery::default().include_category())
        .map_err(|e| store_failure("list posts", e))?;

    Ok(Overview { categories, posts })
}
