//! objdav-serve: expose a local directory as WebDAV resources.
//!
//! # Usage
//!
//! ```bash
//! # Serve a directory on the default port
//! objdav-serve --root /srv/share
//!
//! # Use a configuration file, overriding its port
//! objdav-serve --config objdav.toml --port 8080
//! ```

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use objdav_fs::webdav::{self, ResourceDavFs};
use objdav_fs::{BridgeConfig, DavResource, ResourceTree, ScopedLogger};
use std::path::PathBuf;
use std::process;

/// Expose a local directory as WebDAV resources.
#[derive(Parser, Debug)]
#[command(name = "objdav-serve")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory exposed as the WebDAV root (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let mut config = match &args.config {
        Some(path) => match BridgeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => BridgeConfig::default(),
    };
    if let Some(root) = args.root {
        config.root = root;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    if !config.root.is_dir() {
        error!("Not a directory: {}", config.root.display());
        process::exit(1);
    }

    let sink = match config.open_sink() {
        Ok(sink) => sink,
        Err(e) => {
            error!("Failed to open log sink {}: {}", config.log_sink, e);
            process::exit(1);
        }
    };
    let gateway = ScopedLogger::with_prefix(sink, config.log_prefix.clone());

    let tree = ResourceTree::from_config(&config);
    info!("Serving {}", tree.root().display());
    match tree.children("/") {
        Ok(children) => {
            info!("Entries: {}", children.len());
            for child in &children {
                info!("  - {}", child.uri());
            }
        }
        Err(e) => {
            error!("Failed to list {}: {}", tree.root().display(), e);
            process::exit(1);
        }
    }

    let fs = ResourceDavFs::new(tree, &gateway);
    if let Err(e) = webdav::serve(fs, &gateway, config.port).await {
        error!("Server error: {}", e);
        if let Err(sink_err) = gateway.log_error("server stopped", &e) {
            error!("gateway log write failed: {}", sink_err);
        }
        process::exit(1);
    }
}
