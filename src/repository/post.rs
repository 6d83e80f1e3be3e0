use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::category::Category;
use crate::domain::post::{NewPost, Post};
use crate::domain::types::PostId;
use crate::models::category::Category as DbCategory;
use crate::models::post::{NewPost as DbNewPost, Post as DbPost};
use crate::repository::{
    DieselRepository, PostListQuery, PostReader, RepositoryError, RepositoryResult,
};

fn into_domain(
    row: (DbPost, Option<DbCategory>),
    include_category: bool,
) -> RepositoryResult<Post> {
    let (post, category) = row;
    let mut post: Post = post.try_into()?;
    if include_category {
        post.category = category.map(Category::try_from).transpose()?;
    }
    Ok(post)
}

impl PostReader for DieselRepository {
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<Vec<Post>> {
        use crate::schema::{categories, posts};

        let mut conn = self.conn()?;

        let mut items = posts::table
            .left_join(categories::table)
            .select((posts::all_columns, categories::all_columns.nullable()))
            .order(posts::id.asc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(posts::category_id.eq(category_id.get()));
        }

        items
            .load::<(DbPost, Option<DbCategory>)>(&mut conn)?
            .into_iter()
            .map(|row| into_domain(row, query.include_category))
            .collect()
    }

    fn get_post_by_id(
        &self,
        id: PostId,
        include_category: bool,
    ) -> RepositoryResult<Option<Post>> {
        use crate::schema::{categories, posts};

        let mut conn = self.conn()?;

        let row = posts::table
            .left_join(categories::table)
            .filter(posts::id.eq(id.get()))
            .select((posts::all_columns, categories::all_columns.nullable()))
            .first::<(DbPost, Option<DbCategory>)>(&mut conn)
            .optional()?;

        row.map(|row| into_domain(row, include_category))
            .transpose()
    }
}

pub(super) fn insert_post(conn: &mut DbConnection, post: &NewPost) -> RepositoryResult<Post> {
    use crate::schema::posts;

    let db_post: DbNewPost = post.clone().into();

    let row = diesel::insert_into(posts::table)
        .values(db_post)
        .get_result::<DbPost>(conn)?;

    Ok(row.try_into()?)
}

pub(super) fn overwrite_post(conn: &mut DbConnection, post: &Post) -> RepositoryResult<usize> {
    use crate::schema::posts;

    let affected = diesel::update(posts::table.find(post.id.get()))
        .set(DbNewPost::from(post))
        .execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::Conflict);
    }
    Ok(affected)
}

pub(super) fn remove_post(conn: &mut DbConnection, id: PostId) -> RepositoryResult<usize> {
    use crate::schema::posts;

    let affected = diesel::delete(posts::table.find(id.get())).execute(conn)?;

    if affected == 0 {
        return Err(RepositoryError::Conflict);
    }
    Ok(affected)
}
