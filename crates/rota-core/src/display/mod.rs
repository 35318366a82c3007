//! Display formatting functions and result types.
//!
//! This module provides wrapper types for operation results and collections,
//! enabling consistent markdown formatting across different output contexts
//! (lists, previews, operation confirmations).
//!
//! # Architecture: Display Functions and Wrappers
//!
//! Domain models implement `Display` directly for their canonical rendering;
//! collections and operation outcomes get newtype wrappers so the same data
//! can be formatted differently depending on context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types & │    │   Formatted     │
//! │ (Pattern, Trip) │───▶│  Result Types   │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (PatternSummaries, Trips,
//!   Occurrences)
//! - [`results`]: Operation result types (CreateResult, UpdateResult,
//!   DeleteResult) and report renderings
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! All formatters produce markdown for rich terminal display; headers,
//! metadata, and content follow a standard structure.

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{Occurrences, PatternSummaries, Trips};
pub use datetime::{CivilClock, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::{OperationStatus, Severity};
