// vpsdeals - app/mod.rs
//
// Application layer: data loading, the admin store, session state.
// Dependencies: core layer.

pub mod data_mgr;
pub mod state;
pub mod store;
