//! Infrastructure Layer
//!
//! PostgreSQL and in-memory implementations.

pub mod memory;
pub mod postgres;
