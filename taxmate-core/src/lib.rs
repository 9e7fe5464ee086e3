pub mod calculations;
pub mod db;
pub mod models;
pub mod report;

pub use db::factory::{DbConfig, StoreFactory, StoreRegistry};
pub use db::repository::{EstimateStore, StoreError};
pub use models::*;
