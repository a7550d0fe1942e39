//! Lendit Item Sharing Service
//!
//! A Rust implementation of the Lendit sharing service backend,
//! providing a REST JSON API for sharing items between users:
//! owners publish items, other users book them for a period and
//! comment after use, and missing items can be requested.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
