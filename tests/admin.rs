use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use blog_publisher::models::config::RuntimeEnvironment;
use blog_publisher::routes::{configure_admin, flash_middleware, session_middleware};

mod common;

macro_rules! admin_app {
    ($db:expr) => {{
        let config = common::server_config(RuntimeEnvironment::Test);
        let key = config.cookie_key();
        test::init_service(
            App::new()
                .wrap(flash_middleware(key.clone()))
                .wrap(session_middleware(key.clone()))
                .app_data(web::Data::new($db.repo()))
                .app_data(web::Data::new(config.clone()))
                .app_data(web::Data::new(common::tera()))
                .configure(|cfg| configure_admin(cfg, &config)),
        )
        .await
    }};
}

/// A rendered page plus the cookies it set.
struct Page {
    status: StatusCode,
    html: String,
    cookies: Vec<Cookie<'static>>,
}

impl Page {
    fn csrf_token(&self) -> String {
        let marker = "name=\"csrf_token\" value=\"";
        let start = self.html.find(marker).expect("page should carry a token") + marker.len();
        let end = self.html[start..].find('"').unwrap() + start;
        self.html[start..end].to_string()
    }
}

macro_rules! get_page {
    ($app:expr, $uri:expr) => {
        get_page!($app, $uri, Vec::<Cookie<'static>>::new())
    };
    ($app:expr, $uri:expr, $cookies:expr) => {{
        let mut req = test::TestRequest::get().uri($uri);
        for cookie in $cookies.iter() {
            req = req.cookie(cookie.clone());
        }
        let resp = test::call_service(&$app, req.to_request()).await;
        let status = resp.status();
        // Removal cookies (empty value) must not be sent back.
        let cookies: Vec<Cookie<'static>> = resp
            .response()
            .cookies()
            .filter(|c| !c.value().is_empty())
            .map(|c| c.into_owned())
            .collect();
        let body = test::read_body(resp).await;
        Page {
            status,
            html: String::from_utf8(body.to_vec()).unwrap(),
            cookies,
        }
    }};
}

macro_rules! post_form {
    ($app:expr, $uri:expr, $cookies:expr, $form:expr) => {{
        let mut req = test::TestRequest::post().uri($uri).set_form($form);
        for cookie in $cookies.iter() {
            req = req.cookie(cookie.clone());
        }
        test::call_service(&$app, req.to_request()).await
    }};
}

#[actix_web::test]
async fn landing_page_is_served_on_every_alias() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    for uri in ["/", "/Home", "/Home/Index"] {
        let page = get_page!(app, uri);
        assert_eq!(page.status, StatusCode::OK, "{uri}");
        assert!(page.html.contains("Overview"));
    }
}

#[actix_web::test]
async fn create_category_round_trip() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    assert_eq!(page.status, StatusCode::OK);
    let token = page.csrf_token();

    let resp = post_form!(
        app,
        "/Category/Create",
        page.cookies,
        &[("csrf_token", token.as_str()), ("title", "Travel")]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/Category");

    let list = get_page!(app, "/Category/Index");
    assert!(list.html.contains("Travel"));
    assert!(list.html.contains("/Category/Edit/1"));
}

#[actix_web::test]
async fn empty_title_redisplays_the_form() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    let token = page.csrf_token();

    let resp = post_form!(
        app,
        "/Category/Create",
        page.cookies,
        &[("csrf_token", token.as_str()), ("title", "  ")]
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Title is required"));

    let list = get_page!(app, "/Category");
    assert!(!list.html.contains("/Category/Edit/"));
}

#[actix_web::test]
async fn post_without_token_is_rejected() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    let resp = post_form!(app, "/Category/Create", page.cookies, &[("title", "Sneaky")]);
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_form!(
        app,
        "/Category/Create",
        Vec::<Cookie<'static>>::new(),
        &[("csrf_token", "forged"), ("title", "Sneaky")]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let list = get_page!(app, "/Category");
    assert!(!list.html.contains("Sneaky"));
}

#[actix_web::test]
async fn edit_and_delete_category() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    let token = page.csrf_token();
    let cookies = page.cookies;
    post_form!(
        app,
        "/Category/Create",
        cookies,
        &[("csrf_token", token.as_str()), ("title", "News")]
    );

    let edit = get_page!(app, "/Category/Edit/1", cookies);
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.html.contains("value=\"News\""));

    let resp = post_form!(
        app,
        "/Category/Edit/1",
        cookies,
        &[("csrf_token", token.as_str()), ("id", "2"), ("title", "World")]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("400 Bad Request"));
    assert!(html.contains("does not match"));

    let resp = post_form!(
        app,
        "/Category/Edit/1",
        cookies,
        &[("csrf_token", token.as_str()), ("id", "1"), ("title", "World")]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let confirm = get_page!(app, "/Category/Delete/1", cookies);
    assert!(confirm.html.contains("World"));

    let resp = post_form!(
        app,
        "/Category/DeleteConfirmed/1",
        cookies,
        &[("csrf_token", token.as_str())]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        get_page!(app, "/Category/Edit/1", cookies).status,
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn unknown_ids_are_not_found() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    for uri in ["/Category/Edit/9", "/Category/Delete/9", "/Post/Edit/9", "/Post/Delete/0"] {
        let page = get_page!(app, uri);
        assert_eq!(page.status, StatusCode::NOT_FOUND, "{uri}");
        assert!(page.html.contains("404 Not Found"), "{uri}");
        assert!(page.html.contains("Back to the overview"), "{uri}");
    }
}

#[actix_web::test]
async fn posting_to_unknown_ids_is_not_found() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    let token = page.csrf_token();
    let cookies = page.cookies;

    let resp = post_form!(
        app,
        "/Category/Edit/3",
        cookies,
        &[("csrf_token", token.as_str()), ("id", "3"), ("title", "Ghost")]
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = post_form!(
        app,
        "/Post/DeleteConfirmed/3",
        cookies,
        &[("csrf_token", token.as_str())]
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("404 Not Found"));
}

#[actix_web::test]
async fn create_post_with_category_select() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    let token = page.csrf_token();
    let cookies = page.cookies;
    post_form!(
        app,
        "/Category/Create",
        cookies,
        &[("csrf_token", token.as_str()), ("title", "News")]
    );

    let form = get_page!(app, "/Post/Create", cookies);
    assert!(form.html.contains("<option value=\"1\">News</option>"));

    let resp = post_form!(
        app,
        "/Post/Create",
        cookies,
        &[
            ("csrf_token", token.as_str()),
            ("title", "Hello"),
            ("category_id", "1"),
            ("publication_date", ""),
            ("content", "Body"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Publication date is required"));
    assert!(html.contains("<option value=\"1\" selected>News</option>"));

    let resp = post_form!(
        app,
        "/Post/Create",
        cookies,
        &[
            ("csrf_token", token.as_str()),
            ("title", "Hello"),
            ("category_id", "1"),
            ("publication_date", "2024-05-01"),
            ("content", "Body"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/Post");

    let list = get_page!(app, "/Post");
    assert!(list.html.contains("Hello"));
    assert!(list.html.contains("2024-05-01"));

    let confirm = get_page!(app, "/Post/Delete/1", cookies);
    assert!(confirm.html.contains("News"));
}

#[actix_web::test]
async fn edit_and_delete_post() {
    let db = common::TestDb::new();
    let app = admin_app!(db);

    let page = get_page!(app, "/Category/Create");
    let token = page.csrf_token();
    let cookies = page.cookies;
    for title in ["News", "Travel"] {
        post_form!(
            app,
            "/Category/Create",
            cookies,
            &[("csrf_token", token.as_str()), ("title", title)]
        );
    }
    let resp = post_form!(
        app,
        "/Post/Create",
        cookies,
        &[
            ("csrf_token", token.as_str()),
            ("title", "Hello"),
            ("category_id", "1"),
            ("publication_date", "2024-05-01"),
            ("content", "Body"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let edit = get_page!(app, "/Post/Edit/1", cookies);
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.html.contains("<option value=\"1\" selected>News</option>"));

    let resp = post_form!(
        app,
        "/Post/Edit/1",
        cookies,
        &[
            ("csrf_token", token.as_str()),
            ("id", "2"),
            ("title", "Moved"),
            ("category_id", "2"),
            ("publication_date", "2024-06-01"),
            ("content", "Body"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_form!(
        app,
        "/Post/Edit/1",
        cookies,
        &[
            ("csrf_token", token.as_str()),
            ("id", "1"),
            ("title", "Moved"),
            ("category_id", "2"),
            ("publication_date", "2024-06-01"),
            ("content", "Body"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/Post");

    let confirm = get_page!(app, "/Post/Delete/1", cookies);
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.html.contains("Moved"));
    assert!(confirm.html.contains("Travel"));
    assert!(confirm.html.contains("2024-06-01"));

    let resp = post_form!(
        app,
        "/Post/DeleteConfirmed/1",
        cookies,
        &[("csrf_token", token.as_str())]
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        get_page!(app, "/Post/Edit/1", cookies).status,
        StatusCode::NOT_FOUND
    );
    let list = get_page!(app, "/Category");
    assert!(list.html.contains("Travel"));
}
