//! Core types and trait definitions for the Syllabus subject store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod enrollment;
pub mod error;
pub mod store;
pub mod subject;
pub mod user;

pub use error::{Error, Result, ValidationError};
