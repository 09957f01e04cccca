mod config;
mod error;
mod page;
mod server;
mod state;
mod web;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, Mode};
use server::ChapterArchiveServer;
use state::ArchiveState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries MCP JSON-RPC in mcp mode.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting chapter archive");

    let config = Config::from_env()?;
    info!(
        data_dir = %config.data_dir.display(),
        static_dir = %config.static_dir.display(),
        mode = %config.mode,
        "configuration loaded"
    );

    std::fs::create_dir_all(&config.data_dir)?;
    let state = Arc::new(ArchiveState::load(config.data_dir.clone())?);
    info!(chapters = state.chapters().await.len(), "chapters loaded");

    match config.mode {
        Mode::Web => web::serve(&config, state).await?,
        Mode::Mcp => serve_mcp(&config, state).await?,
    }
    Ok(())
}

async fn serve_mcp(config: &Config, state: Arc<ArchiveState>) -> anyhow::Result<()> {
    let server = ChapterArchiveServer::new(state);

    if let Some(addr) = &config.mcp_tcp_listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
