//! Command-line interface for frame_match
//!
//! Analyzes one image and prints the recreation guide as JSON.

use frame_match::{AnalyzerConfig, ImageAnalyzer};
use std::{env, path::Path, process};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut compact = false;
    let mut config_path = None;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--compact" => compact = true,
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(image_path_str) = image_path_arg else {
        print_help(&args[0]);
        process::exit(1);
    };

    init_logging();

    let config = match config_path {
        Some(path) => match AnalyzerConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default(),
    };

    let analyzer = match ImageAnalyzer::with_config(config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            process::exit(1);
        }
    };

    let image_path = Path::new(&image_path_str);
    info!(path = %image_path.display(), "analyzing image");

    let result = match analyzer.analyze_path(image_path) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    };

    let json = if compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize result: {}", e);
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    println!("frame_match - Photo recreation guide CLI");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <IMAGE_PATH>", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --config <FILE>  Load analyzer settings from a JSON file");
    println!("    --compact        Print single-line JSON");
    println!("    -h, --help       Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG         Log filter (default: info), e.g. RUST_LOG=frame_match=debug");
}
