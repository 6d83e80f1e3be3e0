use blog_publisher::domain::category::{Category, NewCategory};
use blog_publisher::domain::post::NewPost;
use blog_publisher::domain::types::{CategoryId, CategoryTitle, PostContent, PostId, PostTitle};
use blog_publisher::repository::{
    CategoryReader, ChangeWriter, PostListQuery, PostReader, RepositoryError, Saved, UnitOfWork,
};
use chrono::NaiveDate;

mod common;

fn new_category(title: &str) -> NewCategory {
    NewCategory {
        title: CategoryTitle::new(title).expect("valid title"),
    }
}

fn new_post(title: &str, category_id: CategoryId) -> NewPost {
    NewPost {
        title: PostTitle::new(title).expect("valid title"),
        category_id,
        publication_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        content: PostContent::new("Body").expect("valid content"),
    }
}

fn add_category<R: ChangeWriter>(uow: &mut UnitOfWork<R>, title: &str) -> Category {
    uow.add_category(new_category(title));
    uow.save()
        .expect("should save category")
        .remove(0)
        .into_category()
        .expect("insert returns the category")
}

#[test]
fn lists_categories_in_creation_order() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());

    uow.add_category(new_category("Zebra"));
    uow.add_category(new_category("Apple"));
    let saved = uow.save().expect("should save both");
    assert_eq!(saved.len(), 2);

    let titles: Vec<String> = uow
        .repo()
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.title.into_inner())
        .collect();
    assert_eq!(titles, vec!["Zebra", "Apple"]);
}

#[test]
fn deleted_ids_are_never_reused() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());

    let first = add_category(&mut uow, "First");
    uow.remove_category(first.id);
    uow.save().expect("should delete");

    let second = add_category(&mut uow, "Second");
    assert!(second.id.get() > first.id.get());
}

#[test]
fn update_of_missing_row_is_a_conflict_and_rolls_back() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());

    uow.add_category(new_category("Rolled back"));
    uow.update_category(Category {
        id: CategoryId::new(99).unwrap(),
        title: CategoryTitle::new("Ghost").unwrap(),
    });
    let err = uow.save().unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict));
    assert!(uow.repo().list_categories().unwrap().is_empty());
}

#[test]
fn post_for_missing_category_is_a_foreign_key_violation() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());

    uow.add_post(new_post("Orphan", CategoryId::new(7).unwrap()));
    let err = uow.save().unwrap_err();

    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
}

#[test]
fn deleting_a_category_removes_its_posts() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());
    let news = add_category(&mut uow, "News");
    let travel = add_category(&mut uow, "Travel");

    uow.add_post(new_post("Kept", travel.id));
    uow.add_post(new_post("Gone", news.id));
    uow.save().expect("should save posts");

    uow.remove_category(news.id);
    uow.save().expect("should delete category");

    let posts = uow.repo().list_posts(PostListQuery::default()).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title.as_str(), "Kept");
}

#[test]
fn post_reads_include_the_category_on_request() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());
    let news = add_category(&mut uow, "News");
    let travel = add_category(&mut uow, "Travel");

    uow.add_post(new_post("One", news.id));
    uow.add_post(new_post("Two", travel.id));
    let ids: Vec<PostId> = uow
        .save()
        .unwrap()
        .into_iter()
        .filter_map(Saved::into_post)
        .map(|p| p.id)
        .collect();

    let bare = uow.find_post(ids[0], false).unwrap().unwrap();
    assert!(bare.category.is_none());
    let loaded = uow.find_post(ids[0], true).unwrap().unwrap();
    assert_eq!(loaded.category, Some(news.clone()));

    let all = uow
        .repo()
        .list_posts(PostListQuery::default().include_category())
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].category, Some(travel.clone()));

    let filtered = uow
        .repo()
        .list_posts(PostListQuery::default().category(travel.id))
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title.as_str(), "Two");
}

#[test]
fn overwrite_replaces_every_column() {
    let test_db = common::TestDb::new();
    let mut uow = UnitOfWork::new(test_db.repo());
    let news = add_category(&mut uow, "News");
    let travel = add_category(&mut uow, "Travel");

    uow.add_post(new_post("Draft", news.id));
    let post = uow.save().unwrap().remove(0).into_post().unwrap();

    let mut changed = post.clone();
    changed.title = PostTitle::new("Final").unwrap();
    changed.category_id = travel.id;
    changed.publication_date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    uow.update_post(changed);
    uow.save().expect("should update");

    let stored = uow.find_post(post.id, false).unwrap().unwrap();
    assert_eq!(stored.title.as_str(), "Final");
    assert_eq!(stored.category_id, travel.id);
    assert_eq!(
        stored.publication_date,
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    );
    assert!(uow.repo().post_exists(post.id).unwrap());
}
