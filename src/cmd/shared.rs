/*!
shared.rs - helpers shared by serve / list / exec.

Focus:
  - Globals: resolved root directory + git program
  - build_bridge(_async): extract the catalog once and wrap it in a GitBridge
  - runtime(): the multi-thread Tokio runtime each subcommand blocks on
*/

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::git::GitTool;
use crate::mcp::GitBridge;

/// Options every subcommand needs, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Globals {
    /// Absolute directory `cwd` parameters are resolved against.
    pub root: PathBuf,
    pub tool: GitTool,
}

impl Globals {
    /// Resolve CLI values: root defaults to the startup working directory and is made absolute.
    pub fn resolve(root: Option<PathBuf>, git: Option<String>) -> Result<Self> {
        let root = resolve_root(root, std::env::current_dir)?;
        let tool = git
            .filter(|g| !g.trim().is_empty())
            .map(GitTool::new)
            .unwrap_or_default();
        Ok(Self { root, tool })
    }
}

/// An absolute root is used as-is; only a missing or relative one reads the working directory.
fn resolve_root(
    root: Option<PathBuf>,
    current_dir: impl FnOnce() -> std::io::Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(r) = root.as_deref().filter(|r| r.is_absolute()) {
        return Ok(r.to_path_buf());
    }
    let cwd = current_dir().context("Failed to read current working directory")?;
    Ok(absolutize(&cwd, root.as_deref()))
}

fn absolutize(base: &Path, root: Option<&Path>) -> PathBuf {
    match root {
        Some(r) if r.is_absolute() => r.to_path_buf(),
        Some(r) => base.join(r),
        None => base.to_path_buf(),
    }
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")
}

/// Build the bridge and report how long catalog extraction took.
pub async fn build_bridge_async(globals: &Globals) -> (GitBridge, u128) {
    let started = Instant::now();
    let bridge = GitBridge::build(globals.tool.clone(), globals.root.clone()).await;
    (bridge, started.elapsed().as_millis())
}
