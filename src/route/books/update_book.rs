use axum::extract::State;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError},
    extractor::{json::ApiJson, path::ApiPath, validated::Validated},
    server_error,
    state::ApiState,
    types::book::{Book, BookPatch},
};

use super::BooksResponse;

/// Full update: replaces every record whose title matches the path key with
/// the provided record. The replacement may carry a different title.
#[tracing::instrument(name = "update_book", skip_all)]
pub async fn update_book(
    ApiPath(title): ApiPath<String>,
    State(state): State<ApiState>,
    Validated(ApiJson(book)): Validated<ApiJson<Book>>,
) -> Result<BooksResponse, ApiError> {
    let mut books = state.store().read().await.map_err(server_error!(state))?;

    let mut matched = 0;
    for stored in books.iter_mut().filter(|stored| stored.title == title) {
        *stored = book.clone();
        matched += 1;
    }

    if matched == 0 {
        return Err(NotFoundError::with_reason(
            state.error_verbosity(),
            format!("No book titled {title}"),
        )
        .into());
    }

    state
        .store()
        .write(&books)
        .await
        .map_err(server_error!(state))?;

    tracing::debug!(%title, matched, "Book updated");

    Ok(BooksResponse::success(books))
}

/// Partial update: merges the provided fields into every record whose title
/// matches the path key, independently per match.
#[tracing::instrument(name = "partially_update_book", skip_all)]
pub async fn partially_update_book(
    ApiPath(title): ApiPath<String>,
    State(state): State<ApiState>,
    Validated(ApiJson(patch)): Validated<ApiJson<BookPatch>>,
) -> Result<BooksResponse, ApiError> {
    let mut books = state.store().read().await.map_err(server_error!(state))?;

    let mut matched = 0;
    for stored in books.iter_mut().filter(|stored| stored.title == title) {
        stored.merge(&patch);
        matched += 1;
    }

    if matched == 0 {
        return Err(NotFoundError::with_reason(
            state.error_verbosity(),
            format!("No book titled {title}"),
        )
        .into());
    }

    state
        .store()
        .write(&books)
        .await
        .map_err(server_error!(state))?;

    tracing::debug!(%title, matched, "Book partially updated");

    Ok(BooksResponse::success(books))
}
