//! Клиентская библиотека для работы с blog-server по HTTP.
//!
//! `BlogClient` покрывает весь REST API сервера: посты и категории
//! (список, получение, создание, частичное обновление, удаление).
//!
//! Создание возвращает только идентификатор из заголовка `Location`,
//! потому что сервер отвечает `201` с пустым телом.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use http_client::BlogClient;
pub use models::{Category, Collection, Endpoints, Post, PostPatch};
