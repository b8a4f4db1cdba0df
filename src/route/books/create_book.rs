use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    extractor::{json::ApiJson, validated::Validated},
    server_error,
    state::ApiState,
    types::book::Book,
};

use super::STATUS_SUCCESS;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: &'static str,
    pub books: Book,
    pub count: usize,
}

impl IntoResponse for BookCreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Appends a complete book record to the collection.
///
/// Uniqueness of the title is not enforced here, duplicates are legal and
/// the update operations touch all of them.
#[tracing::instrument(name = "create_book", skip_all)]
pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiJson(book)): Validated<ApiJson<Book>>,
) -> Result<BookCreatedResponse, ApiError> {
    let mut books = state.store().read().await.map_err(server_error!(state))?;

    books.push(book.clone());

    state
        .store()
        .write(&books)
        .await
        .map_err(server_error!(state))?;

    tracing::debug!(title = %book.title, "Book created");

    Ok(BookCreatedResponse {
        status: STATUS_SUCCESS,
        books: book,
        count: 1,
    })
}
