//! Remote catalog integration tests
//!
//! Each test starts an in-process mock of the books API on a free local port
//! and talks to it through the HTTP repository.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use my_library::{
    config::ApiConfig,
    error::{AppError, TransportError},
    models::{BookFields, NewBook},
    repository::{BookRepository, HttpBookRepository},
    services::{AssumeYes, CatalogService, DeleteOutcome, LibraryState},
};

/// In-memory books API with a log of received request bodies
#[derive(Clone, Default)]
struct MockApi {
    books: Arc<Mutex<Vec<Value>>>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockApi {
    fn seeded(books: Vec<Value>) -> Self {
        let api = Self::default();
        *api.books.lock().unwrap() = books;
        api
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/books", get(list_books).post(create_book))
            .route("/books/:id", axum::routing::put(update_book).delete(delete_book))
            .with_state(self.clone())
    }
}

async fn list_books(State(api): State<MockApi>) -> Json<Value> {
    Json(Value::Array(api.books.lock().unwrap().clone()))
}

async fn create_book(
    State(api): State<MockApi>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    api.received.lock().unwrap().push(body.clone());

    let mut record = body;
    record["id"] = json!(uuid::Uuid::new_v4().to_string());
    if record.get("isFavorite").is_none() {
        record["isFavorite"] = json!(false);
    }
    api.books.lock().unwrap().push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn update_book(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    api.received.lock().unwrap().push(body.clone());

    let mut books = api.books.lock().unwrap();
    let record = books
        .iter_mut()
        .find(|b| b["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    let mut replaced = body;
    replaced["id"] = json!(id);
    *record = replaced.clone();
    Ok(Json(replaced))
}

async fn delete_book(
    State(api): State<MockApi>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut books = api.books.lock().unwrap();
    let index = books
        .iter()
        .position(|b| b["id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(books.remove(index)))
}

/// Serve `router` on a free port and return its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn repository(base_url: &str, timeout_secs: u64) -> HttpBookRepository {
    HttpBookRepository::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs,
    })
    .expect("Failed to build client")
}

fn seed() -> Vec<Value> {
    vec![
        json!({ "id": "1", "title": "Dune", "author": "Frank Herbert", "coverImage": "", "isFavorite": false }),
        json!({ "id": "2", "title": "Foundation", "author": "Isaac Asimov", "description": "Psychohistory", "isFavorite": true }),
    ]
}

#[tokio::test]
async fn test_list_keeps_service_order() {
    let base_url = serve(MockApi::seeded(seed()).router()).await;
    let books = repository(&base_url, 10).list().await.unwrap();

    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Foundation"]);
    assert!(books[1].is_favorite);
    assert_eq!(books[1].description.as_deref(), Some("Psychohistory"));
}

#[tokio::test]
async fn test_list_non_array_body_is_empty() {
    let router = Router::new().route("/books", get(|| async { Json(json!({ "msg": "Not found" })) }));
    let base_url = serve(router).await;

    let books = repository(&base_url, 10).list().await.unwrap();
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_create_sends_form_and_returns_assigned_id() {
    let api = MockApi::default();
    let base_url = serve(api.router()).await;

    let form = NewBook {
        title: "Bag of Bones".to_string(),
        author: "Stephen King".to_string(),
        cover_image: String::new(),
        description: None,
    };
    let created = repository(&base_url, 10).create(&form).await.unwrap();

    assert!(!created.id.is_empty());
    assert!(!created.is_favorite);
    assert_eq!(
        api.received.lock().unwrap().clone(),
        vec![json!({ "title": "Bag of Bones", "author": "Stephen King", "coverImage": "" })]
    );
}

#[tokio::test]
async fn test_update_unknown_id_is_status_error() {
    let base_url = serve(MockApi::seeded(seed()).router()).await;

    let fields = BookFields {
        title: "Ghost".to_string(),
        author: "Nobody".to_string(),
        ..Default::default()
    };
    let err = repository(&base_url, 10)
        .update("404", &fields)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Transport(TransportError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let router = Router::new().route("/books", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base_url = serve(router).await;

    let err = repository(&base_url, 10).list().await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Transport(TransportError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let router = Router::new().route(
        "/books",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    );
    let base_url = serve(router).await;

    let err = repository(&base_url, 1).list().await.unwrap_err();
    assert!(matches!(err, AppError::Transport(TransportError::Timeout)));
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = repository(&format!("http://{}", addr), 10)
        .list()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
}

#[tokio::test]
async fn test_catalog_flows_against_remote() {
    let api = MockApi::seeded(seed());
    let base_url = serve(api.router()).await;
    let catalog = CatalogService::new(Arc::new(repository(&base_url, 10)));

    let mut state = LibraryState::new();
    assert_eq!(catalog.activate(&mut state).await.unwrap().unwrap(), 2);

    // favorite toggle sends the full record with the flag inverted
    let dune = state.find("1").cloned().unwrap();
    assert!(catalog.toggle_favorite(&mut state, &dune).await.unwrap());
    assert_eq!(
        api.received.lock().unwrap().last().cloned().unwrap(),
        json!({ "title": "Dune", "author": "Frank Herbert", "coverImage": "", "isFavorite": true })
    );
    assert!(state.find("1").unwrap().is_favorite);

    // create shows up after the refetch
    let form = NewBook {
        title: "Dune Messiah".to_string(),
        author: "Frank Herbert".to_string(),
        ..Default::default()
    };
    catalog.create(&mut state, &form).await.unwrap();
    state.set_search_term("dune");
    let titles: Vec<&str> = state.filtered_books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Dune Messiah"]);

    // delete removes it remotely and locally
    let foundation = state.find("2").cloned().unwrap();
    let outcome = catalog
        .delete(&mut state, &foundation, &mut AssumeYes)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(state.find("2").is_none());
    assert_eq!(api.books.lock().unwrap().len(), 2);
}
