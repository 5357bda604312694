use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ndvi_relief::colour::Palette;
use ndvi_relief::io::OutputOptions;

#[derive(Parser)]
#[command(name = "ndvi-relief", version = ndvi_relief::VERSION)]
#[command(about = "NDVI calculator with dynamic colour-relief rendering")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct GeoTiffArgs {
    /// Compression for the NDVI GeoTIFF (DEFLATE, ZSTD, LZW, NONE)
    #[arg(long, default_value = "DEFLATE")]
    pub compress: String,

    /// Compression level (DEFLATE 1-9, ZSTD 1-22)
    #[arg(long, default_value = "6")]
    pub compress_level: u8,

    /// Write a striped instead of a tiled GeoTIFF
    #[arg(long)]
    pub no_tiled: bool,
}

impl GeoTiffArgs {
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            compress: self.compress.clone(),
            compress_level: self.compress_level,
            tiled: !self.no_tiled,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalized Difference Vegetation Index: (NIR-RED)/(NIR+RED)
    Ndvi {
        /// Red band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// Near infrared band
        #[arg(short = 'n', long)]
        nir: PathBuf,

        /// Output GeoTIFF
        #[arg(short, long, default_value = "ndvi.tif")]
        output: PathBuf,

        #[command(flatten)]
        geotiff: GeoTiffArgs,
    },

    /// Colour a single band raster with a colour-relief table
    Colourize {
        /// Single band input raster
        #[arg(short, long)]
        input: PathBuf,

        /// Coloured GeoTIFF output
        #[arg(short, long)]
        output: PathBuf,

        /// Existing colour-relief file; derived from the data range when omitted
        #[arg(long)]
        colour_map: Option<PathBuf>,

        /// Palette for the derived colour map (terrain, red-green)
        #[arg(long, default_value = "red-green")]
        palette: Palette,
    },

    /// Convert a GeoTIFF to PNG at full resolution
    Png {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// NDVI, colour relief and optional PNG in one go
    Run {
        /// Red band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// Near infrared band
        #[arg(short = 'n', long)]
        nir: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Palette for the derived colour map (terrain, red-green)
        #[arg(long, default_value = "red-green")]
        palette: Palette,

        /// Existing colour-relief file instead of a derived one
        #[arg(long)]
        colour_map: Option<PathBuf>,

        /// Also write a PNG
        #[arg(long)]
        png: bool,

        /// Keep the derived colour map next to the outputs
        #[arg(long)]
        keep_colour_map: bool,

        #[command(flatten)]
        geotiff: GeoTiffArgs,
    },

    /// Run jobs from a JSON batch file
    Batch {
        /// Batch configuration file
        config: PathBuf,
    },
}
