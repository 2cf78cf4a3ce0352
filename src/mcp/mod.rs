//! MCP side: capability catalog + `ServerHandler` bridging list/call to git.
//!
//! GitBridge::build   -> extract catalog once (failure logged, empty catalog kept)
//! GitBridge::invoke  -> lookup, argument extraction, execute, render text blocks
//! render_result      -> ExecutionResult -> Vec<Content>
//!
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use thiserror::Error;

use crate::git::{self, ExecutionResult, GitTool};

pub mod capability;

pub use capability::{Capability, CapabilityMap, build_capabilities};

pub const NO_OUTPUT_SUCCESS: &str = "Command completed successfully with no output.";
pub const NO_OUTPUT_FAILURE: &str = "Command failed with no output.";

const INSTRUCTIONS: &str = "Every tool runs one git subcommand. Pass extra command-line \
arguments in `args` (shell syntax, passed through verbatim) and an optional working \
directory in `cwd`, relative to the server root.";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Unknown capability: {name}")]
    UnknownCapability { name: String },
}

impl From<BridgeError> for McpError {
    fn from(err: BridgeError) -> Self {
        McpError::invalid_params(err.to_string(), None)
    }
}

/// Parameters accepted by every capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeParams {
    pub args: String,
    pub cwd: String,
}

impl Default for InvokeParams {
    fn default() -> Self {
        Self {
            args: String::new(),
            cwd: ".".to_string(),
        }
    }
}

impl InvokeParams {
    /// Read `args` / `cwd` from a call's argument object; absent keys take defaults.
    pub fn from_arguments(arguments: Option<&JsonObject>) -> Result<Self, String> {
        let mut params = Self::default();
        let Some(obj) = arguments else {
            return Ok(params);
        };
        if let Some(v) = string_field(obj, "args")? {
            params.args = v;
        }
        if let Some(v) = string_field(obj, "cwd")? {
            params.cwd = v;
        }
        Ok(params)
    }
}

fn string_field(obj: &JsonObject, key: &str) -> Result<Option<String>, String> {
    match obj.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("parameter '{key}' must be a string, got {other}")),
    }
}

/// Turn an execution result into text blocks (STDOUT, STDERR, ERROR; or one fallback line).
pub fn render_result(result: &ExecutionResult) -> Vec<Content> {
    let mut blocks = Vec::new();
    let sections = [
        ("STDOUT", &result.stdout),
        ("STDERR", &result.stderr),
        ("ERROR", &result.error_message),
    ];
    for (label, field) in sections {
        if let Some(text) = field.as_deref().filter(|t| !t.is_empty()) {
            blocks.push(Content::text(format!("{label}:\n{text}")));
        }
    }
    if blocks.is_empty() {
        let text = if result.succeeded {
            NO_OUTPUT_SUCCESS
        } else {
            NO_OUTPUT_FAILURE
        };
        blocks.push(Content::text(text));
    }
    blocks
}

/// Read-only catalog plus the context needed to run entries.
#[derive(Debug)]
pub struct Catalog {
    tool: GitTool,
    root: PathBuf,
    capabilities: CapabilityMap,
}

impl Catalog {
    pub fn new(tool: GitTool, root: PathBuf, capabilities: CapabilityMap) -> Self {
        Self {
            tool,
            root,
            capabilities,
        }
    }

    pub fn tool(&self) -> &GitTool {
        &self.tool
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.values()
    }
}

/// MCP server handler. Cheap to clone; the catalog is shared and never mutated.
#[derive(Debug, Clone)]
pub struct GitBridge {
    catalog: Arc<Catalog>,
}

impl GitBridge {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Build the catalog from git's help output. Extraction failures are
    /// logged and leave the catalog empty.
    pub async fn build(tool: GitTool, root: PathBuf) -> Self {
        let ops = match git::extract_catalog(&tool).await {
            Ok(ops) => ops,
            Err(e) => {
                tracing::warn!(error = %e, "catalog extraction failed; continuing with no tools");
                Vec::new()
            }
        };
        let capabilities = build_capabilities(&tool, &ops);
        tracing::info!(
            count = capabilities.len(),
            root = %root.display(),
            "git capability catalog ready"
        );
        Self::new(Catalog::new(tool, root, capabilities))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tools(&self) -> Vec<rmcp::model::Tool> {
        self.catalog.iter().map(Capability::to_tool).collect()
    }

    /// Invoke a capability by name.
    ///
    /// Only an unknown name is an `Err`; execution failures and bad arguments
    /// come back as an error result carrying text blocks.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<CallToolResult, BridgeError> {
        let cap = self
            .catalog
            .get(name)
            .ok_or_else(|| BridgeError::UnknownCapability {
                name: name.to_string(),
            })?;

        let params = match InvokeParams::from_arguments(arguments) {
            Ok(p) => p,
            Err(msg) => {
                tracing::debug!(capability = name, error = %msg, "rejected arguments");
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "ERROR:\n{msg}"
                ))]));
            }
        };

        let cwd = self.catalog.root().join(&params.cwd);
        tracing::debug!(capability = name, token = %cap.token, cwd = %cwd.display(), "invoke");

        let result = git::execute(self.catalog.tool(), &cap.token, &params.args, &cwd).await;
        let blocks = render_result(&result);
        if result.succeeded {
            Ok(CallToolResult::success(blocks))
        } else {
            Ok(CallToolResult::error(blocks))
        }
    }
}

impl ServerHandler for GitBridge {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.invoke(&request.name, request.arguments.as_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "call_tool rejected");
                McpError::from(e)
            })
    }
}
