//! Server configuration from command-line flags and environment.
//!
//! # Invariants
//! - Every flag has an environment fallback (`GROCERY_*`).
//! - `ServerConfig::validate` runs before any socket or file is touched.

use anyhow::{bail, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "grocery.sqlite3";

#[derive(Parser, Debug, Clone)]
#[command(name = "grocery_server", about = "Grocery store product backend", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "GROCERY_BIND",
        value_name = "ADDR",
        default_value = DEFAULT_BIND,
        help = "Socket address the HTTP server listens on"
    )]
    pub bind: SocketAddr,

    #[arg(
        long,
        env = "GROCERY_DB_PATH",
        value_name = "FILE",
        default_value = DEFAULT_DB_PATH,
        help = "SQLite database file; created and migrated on startup"
    )]
    pub db_path: PathBuf,

    #[arg(
        long,
        env = "GROCERY_LOG_LEVEL",
        value_name = "LEVEL",
        help = "trace|debug|info|warn|error (defaults by build mode)"
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "GROCERY_LOG_DIR",
        value_name = "DIR",
        help = "Absolute directory for rolling log files; stderr only when unset"
    )]
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Self {
        Self {
            bind: args.bind,
            db_path: args.db_path,
            log_level: args
                .log_level
                .unwrap_or_else(|| grocery_core::default_log_level().to_string()),
            log_dir: args.log_dir,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            bail!("db path cannot be empty");
        }
        if self.db_path.is_dir() {
            bail!("db path `{}` is a directory", self.db_path.display());
        }
        Ok(())
    }
}
