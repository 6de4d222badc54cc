use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

/// Terminal wizard for form-driven data collection with PDF export.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the form definition file (JSON or TOML).
    #[arg(short, long, default_value = "frames_config.json")]
    config: PathBuf,

    /// Directory the exported PDF is written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = formwiz::run(&cli.config, cli.output_dir) {
        eprintln!("{}", format!("Fehler: {e:#}").red());
        process::exit(1);
    }
}
