/*!
`exec.rs`

Implements `git-mcp exec <CAPABILITY>`: run one capability through the same
invoke path the MCP server uses and print its text blocks.

  git-mcp exec git-status
  git-mcp exec git-log --args "--oneline -n 5" --cwd sub/repo --json

JSON Output Shape:
{
  "status": "ok" | "error",
  "capability": "git-log",
  "elapsed_ms": 42,
  "arguments": { "args": "...", "cwd": "..." },
  "content": [ { "type": "text", "text": "STDOUT:\n..." } ]
}

Exit status is non-zero when the capability is unknown or git failed.
*/

use anyhow::{Result, bail};
use clap::Args;
use std::time::Instant;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, text_block};
use crate::cmd::shared::{Globals, build_bridge_async, runtime};
use crate::mcp::GitBridge;

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Capability name (e.g. git-status)
    #[arg(value_name = "CAPABILITY")]
    pub capability: String,

    /// Arguments appended after the subcommand, passed through the shell verbatim
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Working directory relative to the root
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

impl ExecArgs {
    fn arguments(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        if let Some(a) = &self.args {
            map.insert("args".into(), serde_json::Value::String(a.clone()));
        }
        if let Some(c) = &self.cwd {
            map.insert("cwd".into(), serde_json::Value::String(c.clone()));
        }
        map
    }
}

pub fn execute_exec(args: ExecArgs, globals: &Globals) -> Result<()> {
    let name = args.capability.trim().to_string();
    if name.is_empty() {
        return output_error(args.json, "capability name cannot be empty");
    }

    let rt = runtime()?;
    let arguments = args.arguments();
    let started = Instant::now();
    let outcome = rt.block_on(async {
        let (bridge, _) = build_bridge_async(globals).await;
        invoke(&bridge, &name, &arguments).await
    });
    let elapsed_ms = started.elapsed().as_millis();

    let result = match outcome {
        Ok(r) => r,
        Err(e) => return output_error(args.json, &e.to_string()),
    };
    let failed = result.is_error == Some(true);

    if args.json {
        let out = serde_json::json!({
            "status": if failed { "error" } else { "ok" },
            "capability": name,
            "elapsed_ms": elapsed_ms,
            "arguments": arguments,
            "content": result.content,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let style = StyleOptions::detect();
        let (tag, verdict) = if failed {
            ("error", "Exec Failed")
        } else {
            ("success", "Exec Success")
        };
        println!(
            "{}",
            box_header(
                format!("{} {verdict} ({name})", emoji(tag, &style)),
                Some(format!("root={} • {elapsed_ms} ms", globals.root.display())),
                &style,
            )
        );
        for block in &result.content {
            if let Some(text) = block.as_text() {
                println!("{}", render_block(&text.text, &style));
            }
        }
    }

    if failed {
        bail!("capability '{name}' failed");
    }
    Ok(())
}

async fn invoke(
    bridge: &GitBridge,
    name: &str,
    arguments: &serde_json::Map<String, serde_json::Value>,
) -> Result<rmcp::model::CallToolResult> {
    Ok(bridge.invoke(name, Some(arguments)).await?)
}

/// Color a "LABEL:\nbody" block by its label; other text is printed as-is.
fn render_block(text: &str, style: &StyleOptions) -> String {
    let Some((label, body)) = text.split_once(":\n") else {
        return text.to_string();
    };
    let role = match label {
        "STDOUT" => Role::Success,
        "STDERR" => Role::Secondary,
        "ERROR" => Role::Error,
        _ => return text.to_string(),
    };
    text_block(label, body, role, style)
}

fn output_error(json: bool, msg: &str) -> Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Exec Error", emoji("error", &style));
        println!("{}", box_header(title, Some(color(Role::Error, msg, &style)), &style));
    }
    bail!(msg.to_string())
}
