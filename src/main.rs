use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;

use crate::cli::{Cli, Commands};
use ndvi_relief::workflow::RunOptions;
use ndvi_relief::{batch, logging, processing, render, workflow};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Ndvi {
            red,
            nir,
            output,
            geotiff,
        } => {
            let summary =
                processing::generate_ndvi(&red, &nir, &output, &geotiff.output_options())?;
            if let (Some(min), Some(max)) = (summary.min, summary.max) {
                log::info!("NDVI range [{:.4}, {:.4}]", min, max);
            }
            log::info!("Processing complete: {}", output.display());
        }
        Commands::Colourize {
            input,
            output,
            colour_map,
            palette,
        } => {
            render::colour_map_image(&input, &output, colour_map.as_deref(), palette)?;
        }
        Commands::Png { input, output } => {
            render::tiff_to_png(&input, &output)?;
        }
        Commands::Run {
            red,
            nir,
            output_dir,
            palette,
            colour_map,
            png,
            keep_colour_map,
            geotiff,
        } => {
            let options = RunOptions {
                output: geotiff.output_options(),
                palette,
                png,
                keep_colour_map,
                colour_map,
            };
            let outputs = workflow::run(&red, &nir, &output_dir, &options)?;
            log::info!("Processing complete: {}", outputs.coloured.display());
        }
        Commands::Batch { config } => {
            batch::process_batch(&config)?;
        }
    }

    Ok(())
}
