use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    error::ErrorVerbosity,
    server::{self, ServerConfig},
    state::ApiState,
    store::{BookStore, MemoryStore},
    types::book::Book,
};

fn things_fall_apart() -> Book {
    Book {
        author: "Chinua Achebe".to_string(),
        country: "Nigeria".to_string(),
        image_link: "images/things-fall-apart.jpg".to_string(),
        language: "English".to_string(),
        link: "https://en.wikipedia.org/wiki/Things_Fall_Apart".to_string(),
        pages: 209,
        title: "Things Fall Apart".to_string(),
        year: 1958,
    }
}

fn fairy_tales() -> Book {
    Book {
        author: "Hans Christian Andersen".to_string(),
        country: "Denmark".to_string(),
        image_link: "images/fairy-tales.jpg".to_string(),
        language: "Danish".to_string(),
        link: "https://en.wikipedia.org/wiki/Fairy_Tales_Told_for_Children".to_string(),
        pages: 784,
        title: "Fairy tales".to_string(),
        year: 1836,
    }
}

fn catalog(books: Vec<Book>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(books));
    let state = ApiState::new(ErrorVerbosity::Full, store.clone());

    (server::router(state), store)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&body).expect("Body is serializable"),
            ))
            .expect("Request is valid"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Request is valid"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect the response body")
        .to_bytes();

    let body = match bytes.is_empty() {
        true => Value::Null,
        false => serde_json::from_slice(&bytes).expect("Response body is JSON"),
    };

    (status, body)
}

#[tokio::test]
async fn example_config_is_valid() {
    ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");
}

#[tokio::test]
async fn info_returns_the_version() {
    let (router, _) = catalog(vec![]);

    let (status, body) = send(&router, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn created_book_round_trips_through_filters() {
    let (router, _) = catalog(vec![]);

    let (status, body) = send(
        &router,
        Method::POST,
        "/books",
        Some(serde_json::to_value(things_fall_apart()).expect("Book is serializable")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"]["title"], "Things Fall Apart");

    let (status, body) = send(
        &router,
        Method::GET,
        "/books?author=Chinua%20Achebe&year=1958",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["books"][0],
        serde_json::to_value(things_fall_apart()).expect("Book is serializable")
    );
}

#[tokio::test]
async fn author_path_filters_the_collection() {
    let (router, _) = catalog(vec![things_fall_apart(), fairy_tales()]);

    let (status, body) = send(&router, Method::GET, "/books/Chinua%20Achebe", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"][0]["author"], "Chinua Achebe");

    let (status, body) = send(&router, Method::GET, "/books/Unknown%20Author", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn list_without_filters_returns_everything() {
    let (router, _) = catalog(vec![things_fall_apart(), fairy_tales()]);

    let (status, body) = send(&router, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn repeated_full_update_leaves_the_collection_unchanged() {
    let (router, store) = catalog(vec![things_fall_apart(), fairy_tales()]);

    let mut replacement = things_fall_apart();
    replacement.pages = 300;

    let body = serde_json::to_value(&replacement).expect("Book is serializable");

    let (status, _) = send(
        &router,
        Method::PUT,
        "/books/Things%20Fall%20Apart",
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after_first = store.read().await.expect("Read failed");

    let (status, _) = send(
        &router,
        Method::PUT,
        "/books/Things%20Fall%20Apart",
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after_second = store.read().await.expect("Read failed");

    assert_eq!(after_first, after_second);
    assert_eq!(after_first[0].pages, 300);
}

#[tokio::test]
async fn update_on_missing_title_is_not_found_and_changes_nothing() {
    let (router, store) = catalog(vec![things_fall_apart()]);

    let (status, _) = send(
        &router,
        Method::PUT,
        "/books/No%20Such%20Book",
        Some(serde_json::to_value(fairy_tales()).expect("Book is serializable")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        store.read().await.expect("Read failed"),
        vec![things_fall_apart()]
    );

    let (status, _) = send(
        &router,
        Method::PATCH,
        "/books/No%20Such%20Book",
        Some(json!({"year": 2023})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        store.read().await.expect("Read failed"),
        vec![things_fall_apart()]
    );
}

#[tokio::test]
async fn full_update_touches_every_matching_title() {
    let mut duplicate = things_fall_apart();
    duplicate.language = "Igbo".to_string();

    let (router, store) = catalog(vec![things_fall_apart(), duplicate, fairy_tales()]);

    let mut replacement = things_fall_apart();
    replacement.year = 1959;

    let (status, body) = send(
        &router,
        Method::PUT,
        "/books/Things%20Fall%20Apart",
        Some(serde_json::to_value(&replacement).expect("Book is serializable")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let books = store.read().await.expect("Read failed");
    assert_eq!(books[0], replacement);
    assert_eq!(books[1], replacement);
    assert_eq!(books[2], fairy_tales());
}

#[tokio::test]
async fn delete_then_list_with_the_same_filters_is_empty() {
    let (router, _) = catalog(vec![things_fall_apart(), fairy_tales()]);

    let (status, body) = send(&router, Method::DELETE, "/books?language=Danish", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"][0]["title"], "Fairy tales");

    let (status, body) = send(&router, Method::GET, "/books?language=Danish", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn delete_without_filters_is_rejected() {
    let (router, store) = catalog(vec![things_fall_apart()]);

    let (status, _) = send(&router, Method::DELETE, "/books", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.read().await.expect("Read failed").len(), 1);
}

#[tokio::test]
async fn delete_with_no_match_is_not_found() {
    let (router, store) = catalog(vec![things_fall_apart()]);

    let (status, _) = send(&router, Method::DELETE, "/books?author=Unknown", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.read().await.expect("Read failed").len(), 1);
}

#[tokio::test]
async fn create_with_an_empty_field_is_rejected() {
    let (router, store) = catalog(vec![]);

    let mut book = serde_json::to_value(things_fall_apart()).expect("Book is serializable");
    book["author"] = json!("");

    let (status, _) = send(&router, Method::POST, "/books", Some(book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.read().await.expect("Read failed").is_empty());

    let mut book = serde_json::to_value(things_fall_apart()).expect("Book is serializable");
    book.as_object_mut()
        .expect("Book is an object")
        .remove("link");

    let (status, _) = send(&router, Method::POST, "/books", Some(book)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.read().await.expect("Read failed").is_empty());
}

#[tokio::test]
async fn storage_fault_is_an_internal_server_error() {
    let (router, store) = catalog(vec![things_fall_apart()]);

    store.poison().await;

    let (status, _) = send(&router, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(
        &router,
        Method::POST,
        "/books",
        Some(serde_json::to_value(fairy_tales()).expect("Book is serializable")),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (router, _) = catalog(vec![]);

    let (status, _) = send(&router, Method::GET, "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_method_not_allowed() {
    let (router, _) = catalog(vec![]);

    let (status, _) = send(
        &router,
        Method::POST,
        "/books/Things%20Fall%20Apart",
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

/// The end-to-end walk from the catalog's acceptance checklist: create,
/// filter, patch, delete.
#[tokio::test]
async fn create_patch_delete_scenario() {
    let (router, _) = catalog(vec![]);

    let mut book = things_fall_apart();
    book.title = "T".to_string();
    book.author = "A".to_string();

    let (status, _) = send(
        &router,
        Method::POST,
        "/books",
        Some(serde_json::to_value(&book).expect("Book is serializable")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, Method::GET, "/books?author=A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"][0]["title"], "T");

    let (status, _) = send(
        &router,
        Method::PATCH,
        "/books/T",
        Some(json!({"year": 2023})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, Method::GET, "/books?title=T", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["books"][0]["year"], 2023);
    assert_eq!(body["books"][0]["author"], "A");
    assert_eq!(body["books"][0]["pages"], 209);

    let (status, _) = send(&router, Method::DELETE, "/books?author=A", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, Method::GET, "/books?author=A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}
