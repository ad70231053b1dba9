//! My Library
//!
//! A terminal catalog manager for a remote books API: list, search, create,
//! edit, favorite and delete book records. Every write is followed by a full
//! refetch of the list; filtering happens locally.

use std::sync::Arc;

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod ui;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::HttpBookRepository;
use services::Services;

/// Application state shared by every command
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    /// Wire the HTTP repository and services from configuration
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let repository = HttpBookRepository::new(&config.api)?;
        let services = Services::new(Arc::new(repository));

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
