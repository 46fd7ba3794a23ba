//! Data models: extraction results, invoice drafts and configuration.

pub mod config;
pub mod draft;
pub mod extraction;
