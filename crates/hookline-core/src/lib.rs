//! # hookline-core
//!
//! Core crate for Hookline. Contains configuration schemas and the unified
//! error system shared by the hook registry and the plan runner.
//!
//! This crate has **no** internal dependencies on other Hookline crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
