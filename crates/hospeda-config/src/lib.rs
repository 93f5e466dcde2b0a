//! # Hospeda Config
//!
//! Configuration management for Hospeda.
//! Supports layered configuration from TOML files, a `.env` file and
//! `HOSPEDA__`-prefixed environment variables.

mod app_config;
mod loader;
pub mod validation;

pub use app_config::*;
pub use loader::*;
