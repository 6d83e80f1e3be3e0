use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, routes, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::Tera;

use crate::forms::FieldErrors;
use crate::forms::posts::{AddPostForm, DeletePostForm, EditPostForm};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UnitOfWork};
use crate::routes::{
    admin_error, base_context, check_csrf, form_context, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::posts::{
    category_options, create_post as create_post_service, delete_post as delete_post_service,
    get_post, list_posts, update_post as update_post_service,
};

const INDEX_URL: &str = "/Post";

/// Request-scoped handles needed to render a post form.
struct PostFormView<'a> {
    uow: &'a UnitOfWork<DieselRepository>,
    session: &'a Session,
    flash_messages: &'a IncomingFlashMessages,
    server_config: &'a ServerConfig,
    tera: &'a Tera,
}

impl PostFormView<'_> {
    /// Render `form` together with the category select list.
    fn render<F: Serialize>(
        &self,
        template: &str,
        form: &F,
        selected_category: Option<i32>,
        errors: &FieldErrors,
    ) -> HttpResponse {
        let options = match category_options(selected_category, self.uow) {
            Ok(options) => options,
            Err(err) => return admin_error(err, self.server_config, self.tera),
        };
        let mut context = match form_context(self.flash_messages, self.session, "posts") {
            Ok(context) => context,
            Err(response) => return response,
        };

        context.insert("form", form);
        context.insert("errors", errors);
        context.insert("category_options", &options);
        render_template(self.tera, template, &context)
    }
}

#[routes]
#[get("/Post")]
#[get("/Post/Index")]
pub async fn show_posts(
    uow: UnitOfWork<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_posts(&uow) {
        Ok(posts) => {
            let mut context = base_context(&flash_messages, "posts");
            context.insert("posts", &posts);
            render_template(&tera, "posts/index.html", &context)
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}

#[get("/Post/Create")]
pub async fn create_post_page(
    uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    PostFormView {
        uow: &uow,
        session: &session,
        flash_messages: &flash_messages,
        server_config: &server_config,
        tera: &tera,
    }
    .render(
        "posts/create.html",
        &AddPostForm::default(),
        None,
        &FieldErrors::default(),
    )
}

#[post("/Post/Create")]
pub async fn create_post(
    mut uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddPostForm>,
) -> impl Responder {
    if let Err(response) = check_csrf(&session, &form) {
        return response;
    }

    match create_post_service(form.clone().into(), &mut uow) {
        Ok(post) => {
            FlashMessage::success(format!("Post \"{}\" was created.", post.title)).send();
            redirect(INDEX_URL)
        }
        Err(ServiceError::Validation(errors)) => {
            log::debug!("Post form rejected: {errors}");
            PostFormView {
                uow: &uow,
                session: &session,
                flash_messages: &flash_messages,
                server_config: &server_config,
                tera: &tera,
            }
            .render(
                "posts/create.html",
                &form,
                form.selected_category(),
                &errors,
            )
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}

#[get("/Post/Edit/{id}")]
pub async fn edit_post_page(
    id: web::Path<i32>,
    uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let post = match get_post(Some(id.into_inner()), false, &uow) {
        Ok(post) => post,
        Err(err) => return admin_error(err, &server_config, &tera),
    };

    PostFormView {
        uow: &uow,
        session: &session,
        flash_messages: &flash_messages,
        server_config: &server_config,
        tera: &tera,
    }
    .render(
        "posts/edit.html",
        &EditPostForm::from(&post),
        Some(post.category_id.get()),
        &FieldErrors::default(),
    )
}

#[post("/Post/Edit/{id}")]
pub async fn edit_post(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EditPostForm>,
) -> impl Responder {
    if let Err(response) = check_csrf(&session, &form) {
        return response;
    }

    match update_post_service(id.into_inner(), form.clone().into(), &mut uow) {
        Ok(post) => {
            FlashMessage::success(format!("Post \"{}\" was updated.", post.title)).send();
            redirect(INDEX_URL)
        }
        Err(ServiceError::Validation(errors)) => {
            log::debug!("Post form rejected: {errors}");
            PostFormView {
                uow: &uow,
                session: &session,
                flash_messages: &flash_messages,
                server_config: &server_config,
                tera: &tera,
            }
            .render(
                "posts/edit.html",
                &form,
                form.selected_category(),
                &errors,
            )
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}

#[get("/Post/Delete/{id}")]
pub async fn delete_post_page(
    id: web::Path<i32>,
    uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let post = match get_post(Some(id.into_inner()), true, &uow) {
        Ok(post) => post,
        Err(err) => return admin_error(err, &server_config, &tera),
    };

    match form_context(&flash_messages, &session, "posts") {
        Ok(mut context) => {
            context.insert("post", &post);
            render_template(&tera, "posts/delete.html", &context)
        }
        Err(response) => response,
    }
}

#[post("/Post/DeleteConfirmed/{id}")]
pub async fn delete_post(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    session: Session,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<DeletePostForm>,
) -> impl Responder {
    if let Err(response) = check_csrf(&session, &form) {
        return response;
    }

    match delete_post_service(id.into_inner(), &mut uow) {
        Ok(()) => {
            FlashMessage::success("Post was deleted.").send();
            redirect(INDEX_URL)
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}
