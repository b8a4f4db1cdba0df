use axum::{routing::get, Router};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            "/",
            get(super::list_books::list_books)
                .post(super::create_book::create_book)
                .delete(super::delete_books::delete_books),
        )
        .route(
            "/:key",
            get(super::list_books::list_books_by_author)
                .put(super::update_book::update_book)
                .patch(super::update_book::partially_update_book),
        )
}
