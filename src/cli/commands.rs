use crate::config::ServerConfig;
use crate::samples::create_sample_files;
use crate::server::{HttpServer, SiteService};
use crate::site::Site;
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for chainserve
#[derive(Parser)]
#[command(name = "chainserve")]
#[command(about = "Serve files, directory listings and scripts from a document root", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve a document root over HTTP
    Serve(ServeArgs),
    /// Write sample pages and scripts into a document root
    Samples {
        /// Document root to populate
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

/// Options for `serve`. Anything left unset falls back to the config file.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (default: localhost)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (default: 8080)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Document root (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Seconds a script may run before it is killed (default: 30)
    #[arg(long)]
    pub script_timeout: Option<u64>,

    /// Execute scripts directly instead of through the interpreter
    #[arg(long, default_value_t = false)]
    pub no_interpreter: bool,

    /// Write sample files into the document root before serving
    #[arg(long, default_value_t = false)]
    pub create_samples: bool,
}

impl ServeArgs {
    /// Layer these flags over the config file (or the defaults).
    pub fn into_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(root) = self.root {
            config.document_root = root;
        }
        if let Some(secs) = self.script_timeout {
            config.script_timeout_secs = secs;
        }
        if self.no_interpreter {
            config.script_interpreter = None;
        }
        Ok(config)
    }
}

pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Samples { root } => {
            let written = create_sample_files(&root)
                .with_context(|| format!("Failed to create samples in {}", root.display()))?;
            info!(count = written.len(), root = %root.display(), "sample files created");
            Ok(())
        }
        Commands::Serve(args) => {
            let create_samples = args.create_samples;
            let config = args.into_config()?;
            if create_samples {
                create_sample_files(&config.document_root).with_context(|| {
                    format!(
                        "Failed to create samples in {}",
                        config.document_root.display()
                    )
                })?;
            }
            let site = Site::new(&config).context("Failed to prepare document root")?;
            info!(
                root = %site.document_root().display(),
                addr = %config.bind_addr(),
                "starting server"
            );
            let handle = HttpServer(SiteService::new(site))
                .start(config.bind_addr())
                .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
            handle
                .join()
                .map_err(|e| anyhow!("server stopped unexpectedly: {:?}", e))
        }
    }
}
