//! Configuration lookup and per-invocation request types

pub mod config;
pub mod models;

pub use config::{AppConfig, ConfigStore, resolve};
pub use models::DeliveryRequest;
