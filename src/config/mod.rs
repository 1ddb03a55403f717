//! Configuration loading for the search tool.
//!
//! Settings are read from `conf/config.toml` if present. Missing or invalid
//! entries fall back to defaults so a search can always run.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{LogLevel, SearchConfig};
