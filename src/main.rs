//! Sectionist - a terminal editor for documents stored as ordered sections.
//!
//! # Usage
//!
//! ```bash
//! sectionist
//! sectionist --server http://docs.local:8080 --output book.md
//! sectionist --server http://docs.local:8080 --save
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sectionist::app::App;
use sectionist::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use sectionist::sync::SyncClient;

/// Edit a sectioned document kept on a remote section service
#[derive(Parser, Debug)]
#[command(name = "sectionist", version, about, long_about = None)]
struct Cli {
    /// Base URL of the section service
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Where Ctrl+E writes the combined markdown document
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Heading of the exported document
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Write logs to a file (also SECTIONIST_LOG_FILE)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    /// Flags given on this command line, for merging over the rc files.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            server: self.server.clone(),
            timeout_secs: self.timeout,
            output: self.output.clone(),
            title: self.title.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // The TUI owns stdout and stderr, so without a log file events are dropped.
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_file = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("SECTIONIST_LOG_FILE").map(PathBuf::from));
    init_logging(log_file.as_deref())?;
    tracing::info!(server = effective.server_url(), "starting");

    let client = SyncClient::new(effective.server_url()).with_timeout(effective.timeout());
    let app = App::new(Arc::new(client))
        .with_server_url(effective.server_url())
        .with_output_path(effective.output_path())
        .with_document_title(effective.document_title())
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );

    app.run().context("Application error")
}
