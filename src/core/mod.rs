// src/core/mod.rs

pub mod dom;
pub mod html;
pub mod net;
pub mod sanitize;

pub use dom::{Document, ElementRef};
