//! Sustainability scoring for garments modelled as trees of material
//! components.

pub mod config;
pub mod error;
pub mod product;
pub mod reports;
pub mod scoring;
pub mod supply_chain;
pub mod telemetry;

pub use error::{AppError, CoreError};
