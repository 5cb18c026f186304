pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use error::{ComparatorError, Result};
pub use service::ComparatorService;
pub use store::{load_repository, PlanRepository};
