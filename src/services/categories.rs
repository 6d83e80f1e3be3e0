use crate::domain::category::Category;
use crate::domain::post::Post;
use crate::domain::types::CategoryId;
use crate::forms::categories::{CategoryInput, CategoryPayload};
use crate::repository::{
    CategoryReader, ChangeWriter, PostListQuery, PostReader, RepositoryError, Saved, UnitOfWork,
};

use super::{ServiceError, ServiceResult, resolve_conflict, store_failure};

pub fn list_categories<R>(uow: &UnitOfWork<R>) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match uow.repo().list_categories() {
        Ok(categories) => Ok(categories),
        Err(e) => Err(store_failure("list categories", e)),
    }
}

/// Look up one category. A missing or non-positive id is `NotFound`.
pub fn get_category<R>(id: Option<i32>, uow: &UnitOfWork<R>) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let Some(id) = id.and_then(|id| CategoryId::new(id).ok()) else {
        return Err(ServiceError::NotFound);
    };

    match uow.find_category(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(store_failure("get category", e)),
    }
}

/// A category together with the posts a delete would take with it.
pub fn get_category_with_posts<R>(
    id: Option<i32>,
    uow: &UnitOfWork<R>,
) -> ServiceResult<(Category, Vec<Post>)>
where
    R: CategoryReader + PostReader,
{
    let category = get_category(id, uow)?;
    match uow
        .repo()
        .list_posts(PostListQuery::default().category(category.id))
    {
        Ok(posts) => Ok((category, posts)),
        Err(e) => Err(store_failure("list posts of category", e)),
    }
}

pub fn create_category<R>(input: CategoryInput, uow: &mut UnitOfWork<R>) -> ServiceResult<Category>
where
    R: ChangeWriter,
{
    let payload = CategoryPayload::try_from(input)?;
    uow.add_category(payload.into_new_category());

    let saved = uow
        .save()
        .map_err(|e| store_failure("create category", e))?;
    let category = saved
        .into_iter()
        .find_map(Saved::into_category)
        .ok_or_else(|| ServiceError::Store("insert returned no category".to_string()))?;

    log::info!("Created category {}", category.id);
    Ok(category)
}

/// Overwrite the category at `id` with `input`. The body id must equal the route id.
pub fn update_category<R>(
    id: i32,
    input: CategoryInput,
    uow: &mut UnitOfWork<R>,
) -> ServiceResult<Category>
where
    R: CategoryReader + ChangeWriter,
{
    if input.id != id {
        return Err(ServiceError::BadRequest(format!(
            "route id {id} does not match body id {}",
            input.id
        )));
    }

    let payload = CategoryPayload::try_from(input)?;
    let Ok(category_id) = CategoryId::new(id) else {
        return Err(ServiceError::NotFound);
    };

    let category = payload.into_category(category_id);
    uow.update_category(category.clone());
    match uow.save() {
        Ok(_) => {
            log::info!("Updated category {category_id}");
            Ok(category)
        }
        Err(RepositoryError::Conflict) => Err(resolve_conflict(
            &format!("category {category_id}"),
            uow.repo().category_exists(category_id),
        )),
        Err(e) => Err(store_failure("update category", e)),
    }
}

/// Remove a category and, with it, every post filed under it.
pub fn delete_category<R>(id: i32, uow: &mut UnitOfWork<R>) -> ServiceResult<()>
where
    R: CategoryReader + ChangeWriter,
{
    let category = get_category(Some(id), uow)?;

    uow.remove_category(category.id);
    match uow.save() {
        Ok(_) => {
            log::info!("Deleted category {}", category.id);
            Ok(())
        }
        Err(RepositoryError::Conflict) => Err(resolve_conflict(
            &format!("category {}", category.id),
            uow.repo().category_exists(category.id),
        )),
        Err(e) => Err(store_failure("delete category", e)),
    }
}
