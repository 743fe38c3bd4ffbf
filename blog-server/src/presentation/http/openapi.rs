use utoipa::OpenApi;

use crate::presentation::http::handlers::EndpointsDto;
use crate::presentation::http::handlers::categories::{
    CategoryCollectionDto, CategoryDto, CategoryTitleDto,
};
use crate::presentation::http::handlers::posts::{
    CreatePostDto, PostCollectionDto, PostDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::index,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::categories::list_categories,
        crate::presentation::http::handlers::categories::get_category,
        crate::presentation::http::handlers::categories::create_category,
        crate::presentation::http::handlers::categories::update_category,
        crate::presentation::http::handlers::categories::delete_category
    ),
    components(
        schemas(
            EndpointsDto,
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            PostCollectionDto,
            CategoryTitleDto,
            CategoryDto,
            CategoryCollectionDto
        )
    ),
    tags(
        (name = "index", description = "Entry point"),
        (name = "posts", description = "Post endpoints"),
        (name = "categories", description = "Category endpoints")
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_collection_and_item_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/",
            "/api/posts/",
            "/api/posts/{id}/",
            "/api/categories/",
            "/api/categories/{id}/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
