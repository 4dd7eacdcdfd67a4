#![forbid(unsafe_code)]

//! Storyteller gallery backed by an Airtable table.
//!
//! [`AirtableClient`] fetches raw records, [`StoryCard`] and [`StoryDetail`] project them into
//! what the gallery shows, and [`GalleryLoader`] keeps one fetch in flight per (table, view) and
//! publishes a [`GalleryState`] on a watch channel.

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod record;
pub mod story;
pub mod view;

pub use client::AirtableClient;
pub use config::AirtableConfig;
pub use error::{Error, Result};
pub use loader::{GalleryLoader, RecordSource};
pub use record::{Attachment, FieldValue, Record};
pub use story::{StoryCard, StoryDetail, VideoEmbed};
pub use view::{GalleryState, GalleryView};

/// Table the gallery reads when none is given.
pub const DEFAULT_TABLE: &str = "Storytellers";
/// Airtable's default grid view name.
pub const DEFAULT_VIEW: &str = "Grid view";
