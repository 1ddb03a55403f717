//! Full-text search over the chapters of an EPUB book.
//!
//! The engine scans spine documents on a background thread, extracts the
//! sentence around every match and streams results back in batches. A
//! selected result becomes a navigation request carrying the chapter with
//! the snippet highlighted.

pub mod book;
pub mod cancellation;
pub mod config;
pub mod epub_loader;
pub mod html_text;
pub mod navigation;
pub mod search;
pub mod store;
pub mod text_utils;
