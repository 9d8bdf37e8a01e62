//! Slice Viewer - view line ranges of text files in the browser.
//!
//! This binary parses the CLI, sets up logging, and runs the selected command.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slice_viewer::{
    config::{CheckConfig, Cli, Command, ServeConfig},
    encoding::ChardetDetector,
    error::SliceError,
    io::{FileSource, LocalFileSource},
    server::{create_router, RouterConfig},
    slice::{SliceRequest, SliceService},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Check(config) => run_check(config).await,
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let source = match LocalFileSource::new(&config.root) {
        Ok(source) => source,
        Err(e) => {
            error!("Cannot open serving root: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fallback = config.fallback_encoding();

    info!("Configuration:");
    info!("  Serving root: {}", source.root().display());
    info!("  Default file: {}", config.default_file);
    info!("  Fallback encoding: {}", fallback.name());
    if config.cache_entries == 0 {
        warn!("  Cache: DISABLED - every request re-reads and re-decodes its file");
    } else {
        info!("  Cache: {} slices", config.cache_entries);
    }

    let service = SliceService::with_cache_capacity(source, config.cache_entries)
        .with_detector(ChardetDetector::with_fallback(fallback));

    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("  Try: curl 'http://{}/{}?start_line=0&end_line=9'", addr, config.default_file);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "slice_viewer=debug,tower_http=debug"
    } else {
        "slice_viewer=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_default_file(config.default_file.clone())
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    println!("Slice Viewer Configuration Check");
    println!("════════════════════════════════");
    println!();

    if let Err(e) = config.validate() {
        println!("✗ {}", e);
        return ExitCode::FAILURE;
    }

    let source = match LocalFileSource::new(&config.root) {
        Ok(source) => {
            println!("✓ Root: {}", source.root().display());
            source
        }
        Err(e) => {
            println!("✗ Root: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("✓ Fallback encoding: {}", config.fallback_encoding().name());

    let files = match source.list().await {
        Ok(files) => {
            println!("✓ {} file(s) in root", files.len());
            files
        }
        Err(e) => {
            println!("✗ Cannot list root: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.list_files {
        println!();
        println!("Files:");
        println!("──────");
        if files.is_empty() {
            println!("  (no files found)");
        }
        for file in &files {
            println!("  {}", file);
        }
    }

    if let Some(ref name) = config.test_file {
        println!();
        print!("Reading '{}'... ", name);

        let service = SliceService::without_cache(source)
            .with_detector(ChardetDetector::with_fallback(config.fallback_encoding()));

        match service.read(&SliceRequest::new(name.as_str())).await {
            Ok(response) => {
                println!("✓ ok");
                println!("  Encoding: {}", response.slice.encoding);
                println!("  Lines: {}", response.slice.total_lines);
            }
            Err(SliceError::Internal { detail }) => {
                println!("✗ failed");
                println!("  {}", detail);
                return ExitCode::FAILURE;
            }
            Err(e) => {
                println!("✗ failed");
                println!("  {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    println!();
    println!("════════════════════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}
