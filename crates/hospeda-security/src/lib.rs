//! # Hospeda Security
//!
//! JWT authentication, Argon2 password hashing and role checks for Hospeda.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::*;
pub use password::*;
pub use rbac::*;
