#![forbid(unsafe_code)]

//! Data model, default fixture tables and validation for the Empathy Ledger visualizations.
//!
//! Nothing here draws anything. The render crate consumes these records and turns them into
//! layouts and scenes.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod stats;
pub mod validate;

pub use config::{LedgerConfig, Margin};
pub use error::{Error, Result};
pub use fixtures::Fixtures;
pub use stats::{ValueTotals, value_totals};
pub use validate::{validate_fixtures, validate_flow};
