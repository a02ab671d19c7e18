// vpsdeals - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app, platform, or any I/O directly.

pub mod catalog;
pub mod export;
pub mod filter;
pub mod model;
pub mod stats;
pub mod validate;
