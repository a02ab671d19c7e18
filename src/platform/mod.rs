// vpsdeals - platform/mod.rs
//
// Platform layer: directory resolution and config loading.

pub mod config;
