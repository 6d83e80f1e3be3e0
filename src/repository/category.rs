use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{CategoryReader, DieselRepository, RepositoryError, RepositoryResult};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

pub(super) fn insert_category(
    conn: &mut DbConnection,
    category: &NewCategory,
) -> RepositoryResult<Category> {
    use crate::schema::categories;

    let db_category: DbNewCategory = category.clone().into();

    let row = diesel::insert_into(categories::table)
        .values(db_category)
        .get_result::<DbCategory>(conn)?;

    Ok(row.try_into()?)
}

pub(super) fn overwrite_category(
    conn: &mut DbConnection,
    category: &Category,
) -> RepositoryResult<usize> {
    use crate::schema::categories;

    let affected = diesel::update(categories::table.find(category.id.get()))
        .set(DbNewCategory::from(category))
        .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::Conflict);
    }
    Ok(affected)
}

/// Delete a category together with its posts.
pub(super) fn remove_category(conn: &mut DbConnection, id: CategoryId) -> RepositoryResult<usize> {
    use crate::schema::{categories, posts};

    diesel::delete(posts::table.filter(posts::category_id.eq(id.get()))).execute(conn)?;

    let affected = diesel::delete(categories::table.find(id.get())).execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::Conflict);
    }
    Ok(affected)
}
