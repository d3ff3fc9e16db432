// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod adapters;
pub mod columns;
pub mod config;
pub mod core;
pub mod engine;
pub mod export;
pub mod grid;
pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;
