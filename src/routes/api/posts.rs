use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::posts::{CreatePostRequest, PostDto, UpdatePostRequest};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UnitOfWork};
use crate::routes::api::api_error;
use crate::services::posts::{
    create_post as create_post_service, delete_post as delete_post_service,
    get_post as get_post_service, list_posts as list_posts_service,
    update_post as update_post_service,
};

#[utoipa::path(
    get,
    path = "/api/Post",
    tag = "Post",
    responses((status = 200, description = "Every post with its category", body = [PostDto]))
)]
#[get("/api/Post")]
pub async fn get_posts(
    uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match list_posts_service(&uow) {
        Ok(posts) => {
            HttpResponse::Ok().json(posts.into_iter().map(PostDto::from).collect::<Vec<_>>())
        }
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    get,
    path = "/api/Post/{id}",
    tag = "Post",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post with its category", body = PostDto),
        (status = 404, description = "No post with this id")
    )
)]
#[get("/api/Post/{id}")]
pub async fn get_post(
    id: web::Path<i32>,
    uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match get_post_service(Some(id.into_inner()), true, &uow) {
        Ok(post) => HttpResponse::Ok().json(PostDto::from(post)),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    post,
    path = "/api/Post",
    tag = "Post",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Created; `Location` points at the new post", body = PostDto),
        (status = 400, description = "Validation messages keyed by field")
    )
)]
#[post("/api/Post")]
pub async fn post_post(
    mut uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(request): web::Json<CreatePostRequest>,
) -> HttpResponse {
    match create_post_service(request.into(), &mut uow) {
        Ok(post) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/api/Post/{}", post.id)))
            .json(PostDto::from(post)),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    put,
    path = "/api/Post/{id}",
    tag = "Post",
    params(("id" = i32, Path, description = "Post id, repeated in the body")),
    request_body = UpdatePostRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Id mismatch or validation messages"),
        (status = 404, description = "No post with this id"),
        (status = 409, description = "The post changed concurrently")
    )
)]
#[put("/api/Post/{id}")]
pub async fn put_post(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(request): web::Json<UpdatePostRequest>,
) -> HttpResponse {
    match update_post_service(id.into_inner(), request.into(), &mut uow) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => api_error(err, &server_config),
    }
}

#[utoipa::path(
    delete,
    path = "/api/Post/{id}",
    tag = "Post",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No post with this id")
    )
)]
#[delete("/api/Post/{id}")]
pub async fn delete_post(
    id: web::Path<i32>,
    mut uow: UnitOfWork<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match delete_post_service(id.into_inner(), &mut uow) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => api_error(err, &server_config),
    }
}
