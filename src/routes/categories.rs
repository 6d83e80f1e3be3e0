use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, routes, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::forms::FieldErrors;
use crate::forms::categories::{AddCategoryForm, DeleteCategoryForm, EditCategoryForm};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UnitOfWork};
use crate::routes::{
    admin_error, base_context, check_csrf, form_context, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category, get_category_with_posts, list_categories,
    update_category as update_category_service,
};

const INDEX_URL: &str = "/Category";

fn render_form<F: serde::Serialize>(
    tera: &Tera,
    mut context: Context,
    template: &str,
    form: &F,
    errors: &FieldErrors,
) -> HttpResponse {
    context.insert("form", form);
    context.insert("errors", errors);
    render_template(tera, template, &context)
}

#[routes]
#[get("/Category")]
#[get("/Category/Index")]
pub async fn show_categories(
    uow: UnitOfWork<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match list_categories(&uow) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("categories", &categories);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}

#[get("/Category/Create")]
pub async fn create_category_page(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match form_context(&flash_messages, &session, "categories") {
        Ok(context) => render_form(
            &tera,
            context,
            "categories/create.html",
            &AddCategoryForm::default(),
            &FieldErrors::default(),
        ),
        Err(response) => response,
    }
}

#[post("/Category/Create")]
pub async fn create_category(
    mut uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    if let Err(response) = check_csrf(&session, &form) {
        return response;
    }

    match create_category_service(form.clone().into(), &mut uow) {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" was created.", category.title)).send();
            redirect(INDEX_URL)
        }
        Err(ServiceError::Validation(errors)) => {
            log::debug!("Category form rejected: {errors}");
            match form_context(&flash_messages, &session, "categories") {
                Ok(context) => {
                    render_form(&tera, context, "categories/create.html", &form, &errors)
                }
                Err(response) => response,
            }
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}

#[get("/Category/Edit/{id}")]
pub async fn edit_category_page(
    id: web::Path<i32>,
    uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category = match get_category(Some(id.into_inner()), &uow) {
        Ok(category) => category,
        Err(err) => return admin_error(err, &server_config, &tera),
    };

    match form_context(&flash_messages, &session, "categories") {
        Ok(context) => render_form(
            &tera,
            context,
            "categories/edit.html",
            &EditCategoryForm::from(&category),
            &FieldErrors::default(),
        ),
        Err(response) => response,
    }
}

#[post("/Category/Edit/{id}")]
pub async fn edit_category(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<EditCategoryForm>,
) -> impl Responder {
    if let Err(response) = check_csrf(&session, &form) {
        return response;
    }

    match update_category_service(id.into_inner(), form.clone().into(), &mut uow) {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" was updated.", category.title)).send();
            redirect(INDEX_URL)
        }
        Err(ServiceError::Validation(errors)) => {
            log::debug!("Category form rejected: {errors}");
            match form_context(&flash_messages, &session, "categories") {
                Ok(context) => render_form(&tera, context, "categories/edit.html", &form, &errors),
                Err(response) => response,
            }
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}

#[get("/Category/Delete/{id}")]
pub async fn delete_category_page(
    id: web::Path<i32>,
    uow: UnitOfWork<DieselRepository>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (category, posts) = match get_category_with_posts(Some(id.into_inner()), &uow) {
        Ok(found) => found,
        Err(err) => return admin_error(err, &server_config, &tera),
    };

    match form_context(&flash_messages, &session, "categories") {
        Ok(mut context) => {
            context.insert("category", &category);
            context.insert("posts", &posts);
            render_template(&tera, "categories/delete.html", &context)
        }
        Err(response) => response,
    }
}

#[post("/Category/DeleteConfirmed/{id}")]
pub async fn delete_category(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    session: Session,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<DeleteCategoryForm>,
) -> impl Responder {
    if let Err(response) = check_csrf(&session, &form) {
        return response;
    }

    match delete_category_service(id.into_inner(), &mut uow) {
        Ok(()) => {
            FlashMessage::success("Category was deleted.").send();
            redirect(INDEX_URL)
        }
        Err(err) => admin_error(err, &server_config, &tera),
    }
}
