use actix_web::{Responder, routes, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UnitOfWork};
use crate::routes::{admin_error, base_context, render_template};
use crate::services::home::show_overview;

#[routes]
#[get("/")]
#[get("/Home")]
#[get("/Home/Index")]
pub async fn index(
    uow: UnitOfWork<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_overview(&uow) {
        Ok(overview) => {
            let mut context = base_context(&flash_messages, "home");
            context.insert("categories", &overview.categories);
            context.insert("posts", &overview.posts);
            render_template(&tera, "home/index.html", &context)
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}
