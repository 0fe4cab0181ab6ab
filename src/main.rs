//! mixorder CLI entry point

use clap::Parser;
use mixorder::config::{Cli, Settings};
use mixorder::pipeline;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    let settings = Settings::from_cli(&cli);

    if let Err(e) = validate_inputs(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match pipeline::run(&settings) {
        Ok(result) => {
            if settings.dry_run {
                return ExitCode::SUCCESS;
            }

            let report = &result.report;
            println!();
            println!(
                "Summary: {} tracks, {}/{} good transitions ({}%), {} moved",
                report.total_tracks,
                report.good_transitions,
                report.total_transitions,
                report.harmonic_score_percent,
                report.moved_tracks
            );
            if let Some(range) = report.bpm_range {
                println!("BPM range: {} - {}", range.min, range.max);
            }
            match &result.output_path {
                Some(path) => println!("Wrote {}", path.display()),
                None => println!("Nothing written (empty playlist)"),
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .init();
}

fn validate_inputs(cli: &Cli) -> Result<(), String> {
    if !cli.input.is_file() {
        return Err(format!(
            "Playlist file does not exist: {}\n\n  Tip: Check the path is correct and accessible.\n  Examples:\n    mixorder -i ./playlist.json -o ./sorted\n    mixorder -i ./playlist.json -o ./sorted --bucket-size 4 --descending",
            cli.input.display()
        ));
    }

    // The output directory is created if needed, but its parent must exist
    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(format!(
                "Output parent directory does not exist: {}\n\n  Tip: The output directory will be created automatically,\n  but its parent directory must exist.\n  Example: mkdir -p {}",
                parent.display(),
                parent.display()
            ));
        }
    }

    Ok(())
}
