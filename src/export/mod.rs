//! Conversion configuration and batch orchestration

pub mod config;
pub mod pipeline;

pub use config::{ConvertConfig, PathStyle};
pub use pipeline::{convert_document, BatchConverter, BatchReport, Converted, Failed};
