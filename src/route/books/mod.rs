use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::types::book::Book;

pub mod app;
pub mod create_book;
pub mod delete_books;
pub mod list_books;
pub mod update_book;

pub use app::app;

pub const STATUS_SUCCESS: &str = "success";

/// The `{status, books, count}` envelope shared by the collection
/// operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct BooksResponse {
    pub status: &'static str,
    pub books: Vec<Book>,
    pub count: usize,
}

impl BooksResponse {
    pub fn success(books: Vec<Book>) -> Self {
        let count = books.len();

        BooksResponse {
            status: STATUS_SUCCESS,
            books,
            count,
        }
    }
}

impl IntoResponse for BooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
