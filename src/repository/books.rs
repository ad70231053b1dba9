//! HTTP implementation of the books repository

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{AppResult, TransportError},
    models::{Book, BookFields, NewBook},
};

use super::BookRepository;

/// Remote catalog reached over HTTP/JSON
#[derive(Clone)]
pub struct HttpBookRepository {
    client: Client,
    base_url: String,
}

impl HttpBookRepository {
    /// Build a client whose every request is bounded by the configured timeout
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn books_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    fn book_url(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, id)
    }
}

/// Turn a non-success status into a transport error
fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl BookRepository for HttpBookRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let url = self.books_url();
        tracing::debug!("GET {}", url);

        let response = check_status(self.client.get(&url).send().await?)?;
        let body: Value = response.json().await?;

        match body {
            Value::Array(_) => {
                let books: Vec<Book> = serde_json::from_value(body)
                    .map_err(|e| TransportError::Decode(e.to_string()))?;
                tracing::debug!("Fetched {} books", books.len());
                Ok(books)
            }
            other => {
                tracing::warn!("Book list response is not an array: {}", other);
                Ok(Vec::new())
            }
        }
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let url = self.books_url();
        tracing::debug!("POST {} title={:?}", url, book.title);

        let response = check_status(self.client.post(&url).json(book).send().await?)?;
        let created: Book = response.json().await?;

        tracing::info!("Created book id={}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &str, fields: &BookFields) -> AppResult<Book> {
        let url = self.book_url(id);
        tracing::debug!("PUT {}", url);

        let response = check_status(self.client.put(&url).json(fields).send().await?)?;
        let updated: Book = response.json().await?;

        tracing::info!("Updated book id={}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let url = self.book_url(id);
        tracing::debug!("DELETE {}", url);

        // Body is service-defined and not used
        check_status(self.client.delete(&url).send().await?)?;

        tracing::info!("Deleted book id={}", id);
        Ok(())
    }
}
