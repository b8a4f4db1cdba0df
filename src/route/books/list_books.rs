use axum::extract::State;

use crate::{
    error::ApiError,
    extractor::{path::ApiPath, query::ApiQuery},
    server_error,
    state::ApiState,
    types::book::BookFilter,
};

use super::BooksResponse;

/// Lists the collection, narrowed by the equality filters given as query
/// parameters. No filters returns everything.
#[tracing::instrument(name = "list_books", skip_all)]
pub async fn list_books(
    ApiQuery(filter): ApiQuery<BookFilter>,
    State(state): State<ApiState>,
) -> Result<BooksResponse, ApiError> {
    let books = state.store().read().await.map_err(server_error!(state))?;

    let books = books
        .into_iter()
        .filter(|book| filter.matches(book))
        .collect();

    Ok(BooksResponse::success(books))
}

/// Lists every book by the author given as path parameter.
#[tracing::instrument(name = "list_books_by_author", skip_all)]
pub async fn list_books_by_author(
    ApiPath(author): ApiPath<String>,
    State(state): State<ApiState>,
) -> Result<BooksResponse, ApiError> {
    let filter = BookFilter {
        author: Some(author),
        ..Default::default()
    };

    let books = state.store().read().await.map_err(server_error!(state))?;

    let books = books
        .into_iter()
        .filter(|book| filter.matches(book))
        .collect();

    Ok(BooksResponse::success(books))
}
