//! Game-data extraction for Honkai: Star Rail characters.
//!
//! Loads raw definition tables and text maps ([data]), binds definitions to
//! level rows and localized text ([leveled]), and assembles per-character
//! export records ([extract]), optionally across a worker pool ([parallel]).

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod extract;
pub mod leveled;
pub mod logging;
pub mod parallel;

pub use data::DataRegistry;
pub use error::{DataIntegrityError, ExportError, ExtractError, LoadError};
pub use extract::{extract_character, CharacterExport, ExtractObserver, ExtractOptions};
