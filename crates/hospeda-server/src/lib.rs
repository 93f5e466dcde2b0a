//! # Hospeda Server Library
//!
//! Wiring for the server binary: the component container, logging setup
//! and startup reporting.

pub mod container;
pub mod logging;
pub mod startup;
