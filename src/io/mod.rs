// src/io/mod.rs
pub mod reader;
pub mod writer;

pub use reader::{row_windows, spawn_block_reader, BlockPair, GeoInfo, Window};
pub use writer::{FloatRasterWriter, OutputOptions};
