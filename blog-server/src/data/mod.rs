pub(crate) mod category_repository;
pub(crate) mod post_repository;
pub(crate) mod repositories;
