use std::fmt;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_DATA_DIR: &str = "capitols";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Which front end the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// HTML page + JSON API over HTTP
    Web,
    /// MCP tool server over stdio (or TCP, see `MCP_TCP_LISTEN_ADDR`)
    Mcp,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Web => f.write_str("web"),
            Mode::Mcp => f.write_str("mcp"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the chapter JSON documents and their audio files.
    pub data_dir: PathBuf,
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
    /// Address the web server binds to.
    pub listen_addr: String,
    pub mode: Mode,
    /// When set in MCP mode, serve MCP over TCP instead of stdio.
    pub mcp_tcp_listen_addr: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `CHAPTERS_DATA_DIR` (default: "capitols")
    /// - `CHAPTERS_STATIC_DIR` (default: "static")
    /// - `CHAPTERS_LISTEN_ADDR` (default: "0.0.0.0:8080")
    /// - `CHAPTERS_MODE`: "web" (default) or "mcp"
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mode = match lookup("CHAPTERS_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("web") => Mode::Web,
            Some("mcp") => Mode::Mcp,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "CHAPTERS_MODE must be 'web' or 'mcp', got '{other}'"
                )))
            }
        };

        let listen_addr =
            lookup("CHAPTERS_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        if listen_addr.trim().is_empty() {
            return Err(AppError::Config(
                "CHAPTERS_LISTEN_ADDR must not be empty".to_string(),
            ));
        }

        Ok(Self {
            data_dir: lookup("CHAPTERS_DATA_DIR")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            static_dir: lookup("CHAPTERS_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            listen_addr,
            mode,
            mcp_tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR"),
        })
    }
}
