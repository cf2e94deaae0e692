use clap::Parser;
use dicommeta_core::cli::report::TextReport;
use dicommeta_core::cli::{Cli, OutputFormat};
use dicommeta_core::{BatchParser, FileParseResult};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let options = cli.extractor_options();
    info!("Processing {} file(s)", cli.files.len());

    let results = BatchParser::new()
        .with_options(options)
        .on_progress(|done, total| info!("Progress: {}/{}", done, total))
        .run_paths(&cli.files);

    output_results(&results, cli.format);

    if results.iter().all(|r| !r.is_success()) {
        error!("No file could be parsed");
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn output_results(results: &[FileParseResult], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for result in results {
                println!("{}", TextReport::new(result));
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(results) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
