//! Easy Rentals car rental server
//!
//! A REST JSON API for browsing a vehicle fleet, booking cars with computed
//! fares and handling vehicle returns and damage settlement.

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
