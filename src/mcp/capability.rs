//! Capability records advertised to MCP clients, one per discovered operation.

use std::sync::Arc;

use indexmap::IndexMap;
use rmcp::model::{JsonObject, Tool};
use serde::Serialize;
use serde_json::json;

use crate::git::{GitTool, Operation};

/// Protocol-facing description of one operation.
///
/// Serializes to the listing shape `{name, description, inputSchema}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub name: String,
    pub description: String,
    /// Subcommand handed to the executor.
    #[serde(skip)]
    pub token: String,
    pub input_schema: Arc<JsonObject>,
}

impl Capability {
    pub fn to_tool(&self) -> Tool {
        Tool::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        )
    }
}

/// Capabilities keyed by name, in discovery order.
pub type CapabilityMap = IndexMap<String, Capability>;

/// Shared input schema: optional `args` text and optional `cwd`.
pub fn input_schema() -> JsonObject {
    let schema = json!({
        "type": "object",
        "properties": {
            "args": {
                "type": "string",
                "description": "Arguments passed verbatim after the subcommand (shell syntax)",
                "default": ""
            },
            "cwd": {
                "type": "string",
                "description": "Working directory, relative to the server root",
                "default": "."
            }
        }
    });
    match schema {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Derive one capability per operation. Pure; the input is left untouched.
pub fn build_capabilities(tool: &GitTool, ops: &[Operation]) -> CapabilityMap {
    let schema = Arc::new(input_schema());
    ops.iter()
        .map(|op| {
            let cap = Capability {
                name: op.id.clone(),
                description: format!(
                    "Executes '{} {}': {}",
                    tool.display_name(),
                    op.token,
                    op.description
                ),
                token: op.token.clone(),
                input_schema: schema.clone(),
            };
            (op.id.clone(), cap)
        })
        .collect()
}
