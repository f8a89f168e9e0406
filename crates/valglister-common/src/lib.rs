//! Valglister Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, errors and logging setup for the valglister workspace.
//!
//! # Overview
//!
//! - **Types**: the canonical candidate document ([`types::CanonicalRecord`])
//!   and the closed [`types::Election`] enum
//! - **Error Handling**: [`ValglisterError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber setup shared by all binaries
//!
//! # Example
//!
//! ```
//! use valglister_common::types::{CanonicalRecord, Election};
//!
//! let record = CanonicalRecord::new(2021, Election::Storting);
//! assert_eq!(record.key().to_string(), "2021/storting");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ValglisterError};
pub use types::{CanonicalRecord, Election, ElectionKey, Gender};
