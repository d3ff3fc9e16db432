// src/config/mod.rs

pub mod options;

pub use options::{DemoPage, ExportFormat, ExportOptions, LaunchOptions};
