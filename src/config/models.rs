use crate::html_text::ConverterKind;
use crate::navigation::HighlightStyle;
use serde::Deserialize;

/// Flattened view of `conf/config.toml`; the on-disk tables map onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub converter: ConverterKind,
    /// Upper bound on printed results; 0 prints everything.
    pub max_results: usize,
    pub highlight_tag_id: String,
    pub highlight_color: String,
    pub log_level: LogLevel,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            converter: crate::config::defaults::default_converter(),
            max_results: crate::config::defaults::default_max_results(),
            highlight_tag_id: crate::config::defaults::default_highlight_tag_id(),
            highlight_color: crate::config::defaults::default_highlight_color(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

impl SearchConfig {
    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle {
            tag_id: self.highlight_tag_id.clone(),
            color: self.highlight_color.clone(),
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
