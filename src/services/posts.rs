use serde::Serialize;

use crate::domain::post::Post;
use crate::domain::types::PostId;
use crate::forms::posts::{PostInput, PostPayload};
use crate::forms::{CATEGORY_ID, CATEGORY_MISSING, FieldErrors};
use crate::repository::{
    CategoryReader, ChangeWriter, PostListQuery, PostReader, RepositoryError, Saved, UnitOfWork,
};

use super::{ServiceError, ServiceResult, resolve_conflict, store_failure};

/// One entry of the category `<select>` on the post forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub id: i32,
    pub title: String,
    pub selected: bool,
}

fn category_missing() -> ServiceError {
    ServiceError::Validation(FieldErrors::single(CATEGORY_ID, CATEGORY_MISSING))
}

/// Every post with its category attached, in creation order.
pub fn list_posts<R>(uow: &UnitOfWork<R>) -> ServiceResult<Vec<Post>>
where
    R: PostReader,
{
    match uow
        .repo()
        .list_posts(PostListQuery::default().include_category())
    {
        Ok(posts) => Ok(posts),
        Err(e) => Err(store_failure("list posts", e)),
    }
}

/// Look up one post. A missing or non-positive id is `NotFound`.
pub fn get_post<R>(
    id: Option<i32>,
    include_category: bool,
    uow: &UnitOfWork<R>,
) -> ServiceResult<Post>
where
    R: PostReader,
{
    let Some(id) = id.and_then(|id| PostId::new(id).ok()) else {
        return Err(ServiceError::NotFound);
    };

    match uow.find_post(id, include_category) {
        Ok(Some(post)) => Ok(post),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_failure("get post", e)),
    }
}

pub fn category_options<R>(
    selected: Option<i32>,
    uow: &UnitOfWork<R>,
) -> ServiceResult<Vec<CategoryOption>>
where
    R: CategoryReader,
{
    let categories = match uow.repo().list_categories() {
        Ok(categories) => categories,
        Err(e) => return Err(store_failure("list category options", e)),
    };

    Ok(categories
        .into_iter()
        .map(|category| CategoryOption {
            id: category.id.get(),
            selected: selected == Some(category.id.get()),
            title: category.title.into_inner(),
        })
        .collect())
}

pub fn create_post<R>(input: PostInput, uow: &mut UnitOfWork<R>) -> ServiceResult<Post>
where
    R: ChangeWriter,
{
    let payload = PostPayload::try_from(input)?;
    uow.add_post(payload.into_new_post());

    let saved = match uow.save() {
        Ok(saved) => saved,
        Err(RepositoryError::ForeignKeyViolation(e)) => {
            log::warn!("Rejected post for a missing category: {e}");
            return Err(category_missing());
        }
        Err(e) => return Err(store_failure("create post", e)),
    };
    let post = saved
        .into_iter()
        .find_map(Saved::into_post)
        .ok_or_else(|| ServiceError::Store("insert returned no post".to_string()))?;

    log::info!("Created post {}", post.id);
    Ok(post)
}

/// Overwrite the post at `id` with `input`. The body id must equal the route id.
pub fn update_post<R>(id: i32, input: PostInput, uow: &mut UnitOfWork<R>) -> ServiceResult<Post>
where
    R: PostReader + ChangeWriter,
{
    if input.id != id {
        return Err(ServiceError::BadRequest(format!(
            "route id {id} does not match body id {}",
            input.id
        )));
    }

    let payload = PostPayload::try_from(input)?;
    let Ok(post_id) = PostId::new(id) else {
        return Err(ServiceError::NotFound);
    };

    let post = payload.into_post(post_id);
    uow.update_post(post.clone());
    match uow.save() {
        Ok(_) => {
            log::info!("Updated post {post_id}");
            Ok(post)
        }
        Err(RepositoryError::ForeignKeyViolation(e)) => {
            log::warn!("Rejected post {post_id} for a missing category: {e}");
            Err(category_missing())
        }
        Err(RepositoryError::Conflict) => Err(resolve_conflict(
            &format!("post {post_id}"),
            uow.repo().post_exists(post_id),
        )),
        Err(e) => Err(store_failure("update post", e)),
    }
}

pub fn delete_post<R>(id: i32, uow: &mut UnitOfWork<R>) -> ServiceResult<()>
where
    R: PostReader + ChangeWriter,
{
    let post = get_post(Some(id), false, uow)?;

    uow.remove_post(post.id);
    match uow.save() {
        Ok(_) => {
            log::info!("Deleted post {}", post.id);
            Ok(())
        }
        Err(RepositoryError::Conflict) => Err(resolve_conflict(
            &format!("post {}", post.id),
            uow.repo().post_exists(post.id),
        )),
        Err(e) => Err(store_failure("delete post", e)),
    }
}
