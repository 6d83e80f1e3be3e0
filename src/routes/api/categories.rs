use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::categories::{CategoryDto, CreateCategoryRequest, UpdateCategoryRequest};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UnitOfWork};
use crate::routes::api::api_error;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

#[utoipa::path(
    get,
    path = "/api/Category",
    tag = "Category",
    responses((status = 200, description = "Every category in creation order", body = [CategoryDto]))
)]
#[get("/api/Category")]
pub async fn get_categories(
    uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match list_categories_service(&uow) {
        Ok(categories) => HttpResponse::Ok().json(
            categories
                .into_iter()
                .map(CategoryDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    get,
    path = "/api/Category/{id}",
    tag = "Category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = CategoryDto),
        (status = 404, description = "No category with this id")
    )
)]
#[get("/api/Category/{id}")]
pub async fn get_category(
    id: web::Path<i32>,
    uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match get_category_service(Some(id.into_inner()), &uow) {
        Ok(category) => HttpResponse::Ok().json(CategoryDto::from(category)),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    post,
    path = "/api/Category",
    tag = "Category",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Created; `Location` points at the new category", body = CategoryDto),
        (status = 400, description = "Validation messages keyed by field")
    )
)]
#[post("/api/Category")]
pub async fn post_category(
    mut uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(request): web::Json<CreateCategoryRequest>,
) -> HttpResponse {
    match create_category_service(request.into(), &mut uow) {
        Ok(category) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/api/Category/{}", category.id)))
            .json(CategoryDto::from(category)),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    put,
    path = "/api/Category/{id}",
    tag = "Category",
    params(("id" = i32, Path, description = "Category id, repeated in the body")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Id mismatch or validation messages"),
        (status = 404, description = "No category with this id"),
        (status = 409, description = "The category changed concurrently")
    )
)]
#[put("/api/Category/{id}")]
pub async fn put_category(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(request): web::Json<UpdateCategoryRequest>,
) -> HttpResponse {
    match update_category_service(id.into_inner(), request.into(), &mut uow) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    delete,
    path = "/api/Category/{id}",
    tag = "Category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted together with its posts"),
        (status = 404, description = "No category with this id")
    )
)]
#[delete("/api/Category/{id}")]
pub async fn delete_category(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match delete_category_service(id.into_inner(), &mut uow) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => api_error(err, &server_config),
    }
}
