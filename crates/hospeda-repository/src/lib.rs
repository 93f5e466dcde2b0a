//! # Hospeda Repository
//!
//! Data access for the rental marketplace.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn PropertyRepository>   (traits.rs)
//! MySqlPropertyRepository            (mysql/, SQLx)
//!   ↓  Arc<DatabasePool>             (pool.rs)
//! MySQL
//! ```
//!
//! With the `testing` feature, [`memory`] provides store-backed
//! implementations of the same traits for tests that should not need Docker.

pub mod mysql;
pub mod pool;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
