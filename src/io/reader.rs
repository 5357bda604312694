// src/io/reader.rs
use anyhow::{Context, Result};
use flume::Receiver;
use gdal::raster::Buffer;
use gdal::Dataset;
use std::path::Path;
use std::thread::{self, JoinHandle};

/// Smallest number of rows read per block
const MIN_BLOCK_ROWS: usize = 256;
/// Blocks buffered between the reader thread and the writer
const CHANNEL_CAPACITY: usize = 4;

pub struct GeoInfo {
    pub projection: String,
    /// `None` when the source carries no georeferencing
    pub geo_transform: Option<[f64; 6]>,
    pub width: usize,
    pub height: usize,
    pub nodata: Option<f64>,
    pub block_rows: usize,
}

impl GeoInfo {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let (width, height) = dataset.raster_size();
        let band = dataset.rasterband(1)?;
        let block_rows = band
            .block_size()
            .1
            .max(MIN_BLOCK_ROWS)
            .min(height.max(1));

        let geo_transform = match dataset.geo_transform() {
            Ok(geo_transform) => Some(geo_transform),
            Err(e) => {
                log::warn!("No geotransform on source raster ({}), output stays ungeoreferenced", e);
                None
            }
        };

        Ok(Self {
            projection: dataset.projection(),
            geo_transform,
            width,
            height,
            nodata: band.no_data_value(),
            block_rows,
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let dataset =
            Dataset::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_dataset(&dataset)
    }
}

/// Full-width strip of rows starting at `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Window {
    pub fn offset(&self) -> (isize, isize) {
        (0, self.y as isize)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Split a raster into full-width row windows of at most `block_rows` rows
pub fn row_windows(width: usize, height: usize, block_rows: usize) -> Vec<Window> {
    let block_rows = block_rows.max(1);
    (0..height)
        .step_by(block_rows)
        .map(|y| Window {
            y,
            width,
            height: block_rows.min(height - y),
        })
        .collect()
}

/// Red and NIR pixels for the same window
pub struct BlockPair {
    pub window: Window,
    pub red: Buffer<f32>,
    pub nir: Buffer<f32>,
}

/// Read band 1 of both rasters window by window on a background thread.
///
/// The receiver yields blocks in window order; an `Err` ends the stream.
pub fn spawn_block_reader(
    red_path: &Path,
    nir_path: &Path,
    windows: Vec<Window>,
) -> (Receiver<Result<BlockPair>>, JoinHandle<()>) {
    let (tx, rx) = flume::bounded(CHANNEL_CAPACITY);
    let red_path = red_path.to_path_buf();
    let nir_path = nir_path.to_path_buf();

    let handle = thread::spawn(move || {
        let datasets = open_pair(&red_path, &nir_path);
        let (red_ds, nir_ds) = match datasets {
            Ok(pair) => pair,
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        };

        for window in windows {
            let block = read_window(&red_ds, window)
                .with_context(|| format!("Failed to read red band at row {}", window.y))
                .and_then(|red| {
                    let nir = read_window(&nir_ds, window)
                        .with_context(|| format!("Failed to read NIR band at row {}", window.y))?;
                    Ok(BlockPair { window, red, nir })
                });

            let failed = block.is_err();
            if tx.send(block).is_err() || failed {
                // receiver gone or stream already terminated by an error
                break;
            }
        }
    });

    (rx, handle)
}

fn open_pair(red_path: &Path, nir_path: &Path) -> Result<(Dataset, Dataset)> {
    let red = Dataset::open(red_path)
        .with_context(|| format!("Failed to open red band {}", red_path.display()))?;
    let nir = Dataset::open(nir_path)
        .with_context(|| format!("Failed to open NIR band {}", nir_path.display()))?;
    Ok((red, nir))
}

fn read_window(dataset: &Dataset, window: Window) -> Result<Buffer<f32>> {
    let band = dataset.rasterband(1)?;
    let buffer = band.read_as::<f32>(window.offset(), window.size(), window.size(), None)?;
    Ok(buffer)
}
