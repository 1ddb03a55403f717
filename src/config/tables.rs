use super::defaults;
use super::models::{LogLevel, SearchConfig};
use crate::html_text::ConverterKind;
use serde::Deserialize;

/// On-disk layout: one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    search: SearchTable,
    #[serde(default)]
    highlight: HighlightTable,
    #[serde(default)]
    logging: LoggingTable,
}

impl From<ConfigTables> for SearchConfig {
    fn from(tables: ConfigTables) -> Self {
        SearchConfig {
            converter: tables.search.converter,
            max_results: tables.search.max_results,
            highlight_tag_id: tables.highlight.tag_id,
            highlight_color: tables.highlight.color,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&SearchConfig> for ConfigTables {
    fn from(config: &SearchConfig) -> Self {
        ConfigTables {
            search: SearchTable {
                converter: config.converter,
                max_results: config.max_results,
            },
            highlight: HighlightTable {
                tag_id: config.highlight_tag_id.clone(),
                color: config.highlight_color.clone(),
            },
            logging: LoggingTable {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SearchTable {
    #[serde(default = "defaults::default_converter")]
    converter: ConverterKind,
    #[serde(default = "defaults::default_max_results")]
    max_results: usize,
}

impl Default for SearchTable {
    fn default() -> Self {
        SearchTable {
            converter: defaults::default_converter(),
            max_results: defaults::default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct HighlightTable {
    #[serde(default = "defaults::default_highlight_tag_id")]
    tag_id: String,
    #[serde(default = "defaults::default_highlight_color")]
    color: String,
}

impl Default for HighlightTable {
    fn default() -> Self {
        HighlightTable {
            tag_id: defaults::default_highlight_tag_id(),
            color: defaults::default_highlight_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingTable {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingTable {
    fn default() -> Self {
        LoggingTable {
            log_level: defaults::default_log_level(),
        }
    }
}
