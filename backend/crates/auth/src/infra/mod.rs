//! Infrastructure Layer
//!
//! Persistence and mail delivery implementations.

pub mod mailer;
pub mod memory;
pub mod postgres;
