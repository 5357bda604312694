// src/lib.rs
pub mod batch;
pub mod colour;
pub mod io;
pub mod logging;
pub mod processing;
pub mod render;
pub mod workflow;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
