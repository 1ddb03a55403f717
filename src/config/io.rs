use super::models::SearchConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> SearchConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return SearchConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            SearchConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<SearchConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &SearchConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::html_text::ConverterKind;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("ebup_search_{name}_{nanos}.toml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").expect("empty config parses");
        assert_eq!(cfg, SearchConfig::default());
        assert_eq!(cfg.highlight_tag_id, "search");
        assert_eq!(cfg.highlight_color, "#ddd");
        assert_eq!(cfg.converter, ConverterKind::Strip);
    }

    #[test]
    fn sectioned_tables_map_to_flat_fields() {
        let cfg = parse_config(
            r##"
[search]
converter = "html2text"
max_results = 40

[highlight]
color = "#ffeb3b"

[logging]
log_level = "warn"
"##,
        )
        .expect("config parses");

        assert_eq!(cfg.converter, ConverterKind::Html2text);
        assert_eq!(cfg.max_results, 40);
        assert_eq!(cfg.highlight_tag_id, "search");
        assert_eq!(cfg.highlight_color, "#ffeb3b");
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert_eq!(cfg.highlight_style().color, "#ffeb3b");
    }

    #[test]
    fn empty_tables_take_every_default() {
        let cfg = parse_config("[search]\n[highlight]\n[logging]\n").expect("config parses");
        assert_eq!(cfg, SearchConfig::default());
    }

    #[test]
    fn unknown_converter_is_rejected() {
        assert!(parse_config("[search]\nconverter = \"pandoc\"\n").is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let cfg = SearchConfig {
            max_results: 5,
            log_level: LogLevel::Info,
            ..SearchConfig::default()
        };
        let text = serialize_config(&cfg).expect("serialize");
        assert!(text.contains("[highlight]"));
        assert_eq!(parse_config(&text).expect("parse"), cfg);
    }

    #[test]
    fn load_falls_back_on_missing_or_invalid_file() {
        let missing = unique_temp_path("missing");
        assert_eq!(load_config(&missing), SearchConfig::default());

        let invalid = unique_temp_path("invalid");
        fs::write(&invalid, "[search\nconverter = ").expect("write invalid config");
        assert_eq!(load_config(&invalid), SearchConfig::default());
        let _ = fs::remove_file(&invalid);
    }
}
