// src/workflow.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::colour::Palette;
use crate::io::OutputOptions;
use crate::processing::{generate_ndvi, NdviSummary};
use crate::render;

/// Settings for a full red/NIR -> coloured image run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub output: OutputOptions,
    pub palette: Palette,
    pub png: bool,
    pub keep_colour_map: bool,
    pub colour_map: Option<PathBuf>,
}

/// Files produced by [`run`]
#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub ndvi: PathBuf,
    pub coloured: PathBuf,
    pub png: Option<PathBuf>,
    pub colour_map: Option<PathBuf>,
    pub summary: NdviSummary,
}

/// Output file names are derived from the red band's file stem
pub fn output_stem(red_path: &Path) -> String {
    red_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

pub fn run(red_path: &Path, nir_path: &Path, output_dir: &Path, options: &RunOptions) -> Result<RunOutputs> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let stem = output_stem(red_path);
    let ndvi_path = output_dir.join(format!("{}_ndvi.tif", stem));
    let coloured_path = output_dir.join(format!("{}_ndvi_colour.tif", stem));

    let summary = generate_ndvi(red_path, nir_path, &ndvi_path, &options.output)?;

    let colour_map = match (&options.colour_map, options.keep_colour_map) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => {
            let path = output_dir.join(format!("{}_colour_map.txt", stem));
            render::derive_ramp(&ndvi_path, options.palette)?.write_colour_map(&path)?;
            Some(path)
        }
        (None, false) => None,
    };

    render::colour_map_image(&ndvi_path, &coloured_path, colour_map.as_deref(), options.palette)?;

    let png = if options.png {
        let png_path = output_dir.join(format!("{}_ndvi_colour.png", stem));
        render::tiff_to_png(&coloured_path, &png_path)?;
        Some(png_path)
    } else {
        None
    };

    Ok(RunOutputs {
        ndvi: ndvi_path,
        coloured: coloured_path,
        png,
        colour_map,
        summary,
    })
}
