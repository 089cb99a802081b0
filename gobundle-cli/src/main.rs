use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gobundle_core::config::{DEFAULT_GO_VERSION, GenConfig};
use gobundle_core::{Steps, run_steps};
use log::LevelFilter;

/// Bundles the Go standard library and builds the Go toolchain for js/wasm.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_GO_VERSION)]
    go_version: String,

    #[arg(
        long,
        value_name = "PROGRAM",
        help = "Go toolchain to invoke (defaults to go<VERSION>)"
    )]
    toolchain: Option<String>,

    #[arg(long, default_value = "js")]
    goos: String,

    #[arg(long, default_value = "wasm")]
    goarch: String,

    #[arg(
        long,
        value_name = "PATH",
        default_value = "stdfiles.js",
        help = "Where to write the generated std bundle module"
    )]
    stdfiles: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        default_value = "bin",
        help = "Directory receiving the built .wasm binaries"
    )]
    bin_dir: PathBuf,

    #[arg(long, help = "Do not generate the std bundle", conflicts_with = "skip_bins")]
    skip_stdfiles: bool,

    #[arg(long, help = "Do not build the toolchain binaries")]
    skip_bins: bool,

    #[arg(short, long, help = "Log every toolchain invocation")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    execute(cli)
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn config_from(cli: &Cli) -> GenConfig {
    let mut config = GenConfig::new(&cli.go_version);
    if let Some(toolchain) = &cli.toolchain {
        config.toolchain = toolchain.clone();
    }
    config.goos = cli.goos.clone();
    config.goarch = cli.goarch.clone();
    config.stdfiles_path = cli.stdfiles.clone();
    config.bin_dir = cli.bin_dir.clone();
    config
}

fn execute(cli: Cli) -> Result<()> {
    let config = config_from(&cli);
    let steps = Steps {
        stdfiles: !cli.skip_stdfiles,
        bins: !cli.skip_bins,
    };

    let report = run_steps(&config, steps)
        .with_context(|| format!("generation with {} failed", config.toolchain))?;

    if let Some(files) = report.bundled_files {
        println!(
            "Bundled {files} std files into {}",
            config.stdfiles_path.display()
        );
    }
    if steps.bins {
        println!(
            "Built {} binaries into {}",
            report.binaries.len(),
            config.bin_dir.display()
        );
    }
    Ok(())
}
