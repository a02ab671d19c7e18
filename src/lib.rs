// vpsdeals - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// programmatic use. The CLI lives in `main.rs` and is a thin consumer of
// this surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
