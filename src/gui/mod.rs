// src/gui/mod.rs
pub mod app;
pub mod components;
pub mod grid_widget;

pub use app::run;
