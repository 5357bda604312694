// src/batch.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::colour::Palette;
use crate::io::OutputOptions;
use crate::workflow::{self, RunOptions};

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub jobs: Vec<Job>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct GlobalParams {
    #[serde(default = "default_compress")]
    pub compress: String,
    #[serde(default = "default_compress_level")]
    pub compress_level: u8,
    #[serde(default = "default_true")]
    pub tiled: bool,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub png: bool,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            compress: default_compress(),
            compress_level: default_compress_level(),
            tiled: true,
            palette: Palette::default(),
            png: false,
        }
    }
}

fn default_compress() -> String {
    "DEFLATE".to_string()
}

fn default_compress_level() -> u8 {
    6
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Job {
    pub red: PathBuf,
    pub nir: PathBuf,
    pub output_dir: PathBuf,
    pub palette: Option<Palette>,
    pub png: Option<bool>,
    pub colour_map: Option<PathBuf>,
    #[serde(default)]
    pub keep_colour_map: bool,
    pub compress: Option<String>,
    pub compress_level: Option<u8>,
    pub tiled: Option<bool>,
}

impl BatchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid batch config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Job {
    /// Job settings layered over the global defaults
    pub fn run_options(&self, global: &GlobalParams) -> RunOptions {
        RunOptions {
            output: OutputOptions {
                compress: self.compress.clone().unwrap_or_else(|| global.compress.clone()),
                compress_level: self.compress_level.unwrap_or(global.compress_level),
                tiled: self.tiled.unwrap_or(global.tiled),
            },
            palette: self.palette.unwrap_or(global.palette),
            png: self.png.unwrap_or(global.png),
            keep_colour_map: self.keep_colour_map,
            colour_map: self.colour_map.clone(),
        }
    }
}

pub fn process_batch(config_path: &Path) -> Result<()> {
    let config = BatchConfig::load(config_path)?;
    let total = config.jobs.len();

    log::info!("Starting batch processing with {} jobs...", total);

    for (i, job) in config.jobs.iter().enumerate() {
        log::info!(
            "[{}/{}] {} + {} -> {}",
            i + 1,
            total,
            job.red.display(),
            job.nir.display(),
            job.output_dir.display()
        );

        let options = job.run_options(&config.global);
        workflow::run(&job.red, &job.nir, &job.output_dir, &options)
            .with_context(|| format!("Batch job {} failed", i + 1))?;
    }

    log::info!("Batch processing complete!");
    Ok(())
}
