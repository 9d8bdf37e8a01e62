//! Configuration management for the slice viewer.
//!
//! Configuration comes from command-line arguments via clap, with environment
//! variable fallbacks using the `SLICE_` prefix and defaults for everything.
//!
//! # Commands
//!
//! - `serve` (default when no subcommand is given): run the HTTP server
//! - `check`: validate the serving root and optionally read one file
//!
//! # Environment Variables
//!
//! - `SLICE_HOST` - Server bind address (default: 0.0.0.0)
//! - `SLICE_PORT` - Server port (default: 5000)
//! - `SLICE_ROOT` - Directory files are served from (default: static_files)
//! - `SLICE_DEFAULT_FILE` - File shown at `/` (default: file1.txt)
//! - `SLICE_CACHE_ENTRIES` - Max cached slices, 0 disables (default: 128)
//! - `SLICE_DEFAULT_ENCODING` - Encoding assumed for ASCII-only input (default: utf-8)
//! - `SLICE_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use encoding_rs::{Encoding, UTF_8};

use crate::encoding::encoding_for_label;
use crate::server::DEFAULT_FILENAME;
use crate::slice::DEFAULT_SLICE_CACHE_CAPACITY;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default serving root.
pub const DEFAULT_ROOT: &str = "static_files";

/// Default fallback encoding label.
pub const DEFAULT_ENCODING: &str = "utf-8";

// =============================================================================
// CLI
// =============================================================================

/// Slice Viewer - view line ranges of text files in the browser.
#[derive(Parser, Debug)]
#[command(name = "slice-viewer")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeConfig,
}

impl Cli {
    /// Resolve the command to run; plain invocation means `serve`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeConfig),

    /// Check the serving root and optionally read a file
    Check(CheckConfig),
}

// =============================================================================
// Serve
// =============================================================================

/// Configuration for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "SLICE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SLICE_PORT")]
    pub port: u16,

    /// Directory files are served from.
    #[arg(long, default_value = DEFAULT_ROOT, env = "SLICE_ROOT")]
    pub root: PathBuf,

    /// File shown when no file name is requested.
    #[arg(long, default_value = DEFAULT_FILENAME, env = "SLICE_DEFAULT_FILE")]
    pub default_file: String,

    /// Maximum number of decoded slices to cache (0 disables the cache).
    #[arg(long, default_value_t = DEFAULT_SLICE_CACHE_CAPACITY, env = "SLICE_CACHE_ENTRIES")]
    pub cache_entries: usize,

    /// Encoding label assumed when detection has nothing to go on.
    #[arg(long, default_value = DEFAULT_ENCODING, env = "SLICE_DEFAULT_ENCODING")]
    pub default_encoding: String,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "SLICE_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_root(&self.root)?;

        if self.default_file.is_empty() {
            return Err("default_file must not be empty".to_string());
        }
        if self.default_file.contains(['/', '\\']) {
            return Err(format!(
                "default_file must be a plain file name, got '{}'",
                self.default_file
            ));
        }

        validate_encoding(&self.default_encoding)?;

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Fallback encoding (UTF-8 if the label is unknown; call validate() first).
    pub fn fallback_encoding(&self) -> &'static Encoding {
        encoding_for_label(&self.default_encoding).unwrap_or(UTF_8)
    }
}

// =============================================================================
// Check
// =============================================================================

/// Configuration for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Directory files are served from.
    #[arg(long, default_value = DEFAULT_ROOT, env = "SLICE_ROOT")]
    pub root: PathBuf,

    /// List every file in the serving root.
    #[arg(long, default_value_t = false)]
    pub list_files: bool,

    /// Read this file through the full decode pipeline.
    #[arg(long)]
    pub test_file: Option<String>,

    /// Encoding label assumed when detection has nothing to go on.
    #[arg(long, default_value = DEFAULT_ENCODING, env = "SLICE_DEFAULT_ENCODING")]
    pub default_encoding: String,

    /// Enable verbose logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_root(&self.root)?;
        validate_encoding(&self.default_encoding)
    }

    /// Fallback encoding (UTF-8 if the label is unknown; call validate() first).
    pub fn fallback_encoding(&self) -> &'static Encoding {
        encoding_for_label(&self.default_encoding).unwrap_or(UTF_8)
    }
}

fn validate_root(root: &std::path::Path) -> Result<(), String> {
    if root.as_os_str().is_empty() {
        return Err("Serving root is required. Set --root or SLICE_ROOT".to_string());
    }
    if !root.is_dir() {
        return Err(format!(
            "Serving root '{}' does not exist or is not a directory",
            root.display()
        ));
    }
    Ok(())
}

fn validate_encoding(label: &str) -> Result<(), String> {
    match encoding_for_label(label) {
        Some(_) => Ok(()),
        None => Err(format!("Unknown encoding label '{}'", label)),
    }
}

// =============================================================================
// Tests
// =============================================================================
