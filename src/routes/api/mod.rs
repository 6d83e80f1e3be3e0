//! JSON REST API under `/api`.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::forms::FieldErrors;
use crate::models::config::ServerConfig;
use crate::routes::{error_detail, status_of};
use crate::services::ServiceError;

pub mod categories;
pub mod docs;
pub mod posts;

/// Key under which body-level problems are reported.
pub const BODY_KEY: &str = "$";

/// JSON extractor settings: malformed bodies become a 400 with a field map.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body for {}: {err}", req.path());
    let body = FieldErrors::single(BODY_KEY, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Response for a failed API request.
pub fn api_error(err: ServiceError, config: &ServerConfig) -> HttpResponse {
    let status = status_of(&err);
    match err {
        ServiceError::Validation(errors) => HttpResponse::build(status).json(errors),
        ServiceError::Store(_) => {
            log::error!("API request failed: {err}");
            match error_detail(&err, config) {
                Some(detail) => HttpResponse::build(status)
                    .content_type("text/plain; charset=utf-8")
                    .body(detail),
                None => HttpResponse::build(status).finish(),
            }
        }
        other => {
            log::debug!("API request refused: {other}");
            HttpResponse::build(status).finish()
        }
    }
}

/// Register every API route, plus the interactive docs when the
/// environment exposes diagnostics.
pub fn configure(cfg: &mut web::ServiceConfig, config: &ServerConfig) {
    cfg.app_data(json_config())
        .service(categories::get_categories)
        .service(categories::get_category)
        .service(categories::post_category)
        .service(categories::put_category)
        .service(categories::delete_category)
        .service(posts::get_posts)
        .service(posts::get_post)
        .service(posts::post_post)
        .service(posts::put_post)
        .service(posts::delete_post);

    if config.environment.exposes_diagnostics() {
        cfg.service(docs::swagger_ui());
    }
}
