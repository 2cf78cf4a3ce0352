//! `serve` subcommand: build the catalog, then speak MCP over stdio until the peer leaves.

use anyhow::{Context, Result};
use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

use crate::cmd::shared::{Globals, build_bridge_async, runtime};

#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

pub fn execute_serve(_args: ServeArgs, globals: &Globals) -> Result<()> {
    let rt = runtime()?;
    rt.block_on(async {
        // Catalog must be complete before the first request is read.
        let (bridge, elapsed_ms) = build_bridge_async(globals).await;
        tracing::info!(
            tools = bridge.catalog().len(),
            elapsed_ms,
            program = %globals.tool,
            "serving git over MCP stdio"
        );

        if bridge.catalog().is_empty() {
            tracing::warn!("no git capabilities discovered; clients will see an empty tool list");
        }

        let service = bridge
            .serve(stdio())
            .await
            .context("Failed to initialize MCP stdio server")?;
        let reason = service.waiting().await.context("MCP server task failed")?;
        tracing::info!(?reason, "MCP session ended");
        Ok(())
    })
}
