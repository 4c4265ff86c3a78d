//! Libraries directory server
//!
//! REST JSON API listing libraries (location, contact details, opening
//! hours and photos), plus a small client used by the terminal detail view.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
pub mod views;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
