//! HTTP layer: admin pages, JSON API and the helpers both share.

use std::future::{Ready, ready};

use actix_files::Files;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::csrf::{CsrfProtected, issue_token, verify_token};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UnitOfWork};
use crate::services::ServiceError;

pub mod api;
pub mod categories;
pub mod home;
pub mod posts;

/// Name of the cookie carrying the admin session.
pub const SESSION_COOKIE: &str = "blog_session";

/// Register every admin page and the static assets.
pub fn configure_admin(cfg: &mut web::ServiceConfig, config: &ServerConfig) {
    cfg.service(Files::new("/assets", &config.assets_dir))
        .service(home::index)
        .service(categories::show_categories)
        .service(categories::create_category_page)
        .service(categories::create_category)
        .service(categories::edit_category_page)
        .service(categories::edit_category)
        .service(categories::delete_category_page)
        .service(categories::delete_category)
        .service(posts::show_posts)
        .service(posts::create_post_page)
        .service(posts::create_post)
        .service(posts::edit_post_page)
        .service(posts::edit_post)
        .service(posts::delete_post_page)
        .service(posts::delete_post);
}

/// Signed cookie session holding the anti-forgery token.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        // The admin is served over plain HTTP by default.
        .cookie_secure(false)
        .build()
}

pub fn flash_middleware(key: Key) -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(key).build();
    FlashMessagesFramework::builder(store).build()
}

/// A unit of work bound to the current request.
impl FromRequest for UnitOfWork<DieselRepository> {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<DieselRepository>>() {
            Some(repo) => Ok(UnitOfWork::new(repo.get_ref().clone())),
            None => {
                log::error!("Repository is not registered as application data");
                Err(actix_web::error::ErrorInternalServerError(
                    "repository unavailable",
                ))
            }
        };
        ready(result)
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// 303 so that the browser follows up with a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Context for a page that renders a form: adds the session's anti-forgery
/// token and an empty error map.
pub fn form_context(
    flash_messages: &IncomingFlashMessages,
    session: &Session,
    current_page: &str,
) -> Result<Context, HttpResponse> {
    let token = issue_token(session).map_err(|e| {
        log::error!("Failed to issue anti-forgery token: {e}");
        HttpResponse::InternalServerError().finish()
    })?;

    let mut context = base_context(flash_messages, current_page);
    context.insert("csrf_token", &token);
    context.insert("errors", &crate::forms::FieldErrors::default());
    Ok(context)
}

/// Reject a POST whose anti-forgery token is missing or stale.
pub fn check_csrf<F: CsrfProtected>(session: &Session, form: &F) -> Result<(), HttpResponse> {
    verify_token(session, form.csrf_token()).map_err(|e| {
        log::warn!("Rejected form submission: {e}");
        HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body("The anti-forgery token is missing or invalid.")
    })
}

pub fn status_of(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Conflict => StatusCode::CONFLICT,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error text safe to show to the client, if any.
///
/// Store failures are only described in environments exposing diagnostics.
pub fn error_detail(err: &ServiceError, config: &ServerConfig) -> Option<String> {
    match err {
        ServiceError::Store(_) if !config.environment.exposes_diagnostics() => None,
        ServiceError::NotFound => None,
        other => Some(other.to_string()),
    }
}

/// Error page for a failed admin request.
pub fn admin_error(err: ServiceError, config: &ServerConfig, tera: &Tera) -> HttpResponse {
    let status = status_of(&err);
    if status.is_server_error() {
        log::error!("Admin request failed: {err}");
    }

    let mut context = Context::new();
    context.insert("alerts", &Vec::<(String, String)>::new());
    context.insert("current_page", "");
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or("Error"));
    context.insert("detail", &error_detail(&err, config));
    render_template_with_status(tera, "error.html", &context, status)
}
