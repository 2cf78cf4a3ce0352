//! Operation catalog extraction (runs `git help -a` once at startup).

use std::process::Stdio;

use tokio::process::Command;

use super::help::{SectionPolicy, parse_help};
use super::{ExtractionError, GitTool};

/// One discovered git subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Externally visible name (`git-<token>`), unique across the catalog.
    pub id: String,
    /// Subcommand passed to git (`add`, `log`, ...).
    pub token: String,
    pub description: String,
}

/// Run git's help listing and parse it with the default section policy.
pub async fn extract_catalog(tool: &GitTool) -> Result<Vec<Operation>, ExtractionError> {
    extract_catalog_with(tool, &SectionPolicy::default()).await
}

/// Same as [`extract_catalog`] with explicit section boundary rules.
pub async fn extract_catalog_with(
    tool: &GitTool,
    policy: &SectionPolicy,
) -> Result<Vec<Operation>, ExtractionError> {
    let program = tool.program().to_string();
    tracing::debug!(%program, "running help listing");

    let output = Command::new(&program)
        .args(["help", "-a"])
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ExtractionError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ExtractionError::Failed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let ops = parse_help(&text, policy);
    if ops.is_empty() {
        return Err(ExtractionError::Empty { program });
    }
    tracing::debug!(count = ops.len(), "parsed help listing");
    Ok(ops)
}
