use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use libSpectroTrace::*;

#[derive(Parser, Debug)]
#[command(name = "SpectroTrace")]
#[command(about = "Trace charged particles through a tabulated spectrometer dipole field")]
#[command(version)]
struct Args {
    /// Input TOML file with [options], [geometry_input], [magnet_parameters] and [trajectory_parameters]
    input: PathBuf,

    /// Output file prefix, overrides options.name
    #[arg(short, long)]
    output: Option<String>,

    /// Overwrite existing output files
    #[arg(short, long)]
    force: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.input.exists() {
        bail!("Input error: input file {} does not exist.", args.input.display());
    }

    let (trajectory_inputs, mut options, geometry_input, magnet_parameters) = input::input(&args.input)?;

    if let Some(name) = args.output {
        options.name = name;
    }

    if !args.force {
        if let Some(existing) = output::output_file_names(&options).iter().find(|name| PathBuf::from(name).exists()) {
            bail!("Output error: {} exists. Use -f to overwrite.", existing);
        }
    }

    println!("Input           = {}", args.input.display());
    println!("Output prefix   = {}", options.name);
    println!("Magnet field    = {}", magnet_parameters.field_file.display());

    let tracer = build_tracer(&options, &geometry_input, &magnet_parameters)?;

    trace_loop(trajectory_inputs, tracer, options, geometry_input)?;
    Ok(())
}
