use crate::html_text::ConverterKind;

pub(crate) fn default_converter() -> ConverterKind {
    ConverterKind::Strip
}

pub(crate) fn default_max_results() -> usize {
    0
}

pub(crate) fn default_highlight_tag_id() -> String {
    "search".to_string()
}

pub(crate) fn default_highlight_color() -> String {
    "#ddd".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}
