//! OpenAPI document and Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::categories::{CategoryDto, CreateCategoryRequest, UpdateCategoryRequest};
use crate::dto::posts::{CreatePostRequest, PostDto, UpdatePostRequest};
use crate::routes::api::{categories, posts};

#[derive(OpenApi)]
#[openapi(
    info(title = "Blog API", version = "v1"),
    paths(
        categories::get_categories,
        categories::get_category,
        categories::post_category,
        categories::put_category,
        categories::delete_category,
        posts::get_posts,
        posts::get_post,
        posts::post_post,
        posts::put_post,
        posts::delete_post,
    ),
    components(schemas(
        CategoryDto,
        CreateCategoryRequest,
        UpdateCategoryRequest,
        PostDto,
        CreatePostRequest,
        UpdatePostRequest,
    )),
    tags(
        (name = "Category", description = "Blog categories"),
        (name = "Post", description = "Blog posts")
    )
)]
pub struct ApiDoc;

/// Path of the generated OpenAPI document.
pub const OPENAPI_URL: &str = "/swagger/v1/swagger.json";

/// Bundled Swagger UI under `/swagger/`, serving the document at [`OPENAPI_URL`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger/{_:.*}").url(OPENAPI_URL, ApiDoc::openapi())
}
