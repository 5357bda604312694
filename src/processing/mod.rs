// src/processing/mod.rs
pub mod ndvi;
pub mod pipeline;

// Re-export main components
pub use ndvi::{ndvi, NdviCalculator, NODATA};
pub use pipeline::{generate_ndvi, NdviSummary};
