use axum::extract::State;

use crate::{
    error::{ApiError, ErrorVerbosityProvider, NotFoundError, ValidationError},
    extractor::query::ApiQuery,
    server_error,
    state::ApiState,
    types::book::BookFilter,
};

use super::BooksResponse;

/// Deletes every record matching all provided filters and returns the
/// deleted records.
///
/// An empty filter set is rejected instead of clearing the collection.
#[tracing::instrument(name = "delete_books", skip_all)]
pub async fn delete_books(
    ApiQuery(filter): ApiQuery<BookFilter>,
    State(state): State<ApiState>,
) -> Result<BooksResponse, ApiError> {
    if filter.is_empty() {
        return Err(ValidationError::new(
            state.error_verbosity(),
            "At least one filter is required to delete books".to_string(),
        )
        .into());
    }

    let books = state.store().read().await.map_err(server_error!(state))?;

    let (deleted, remaining): (Vec<_>, Vec<_>) =
        books.into_iter().partition(|book| filter.matches(book));

    if deleted.is_empty() {
        return Err(NotFoundError::with_reason(
            state.error_verbosity(),
            "No book matches the provided filters".to_string(),
        )
        .into());
    }

    state
        .store()
        .write(&remaining)
        .await
        .map_err(server_error!(state))?;

    tracing::debug!(deleted = deleted.len(), "Books deleted");

    Ok(BooksResponse::success(deleted))
}
