/*!
`list.rs`

Implements `git-mcp list`: discover git's subcommands exactly as the server
would and print the resulting capabilities.

JSON Output Shape (array, discovery order):
[
  { "name": "git-add", "description": "Executes 'git add': ...", "inputSchema": {...} }
]
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, TableOpts, box_header, color, emoji, table};
use crate::cmd::shared::{Globals, build_bridge_async, runtime};
use crate::mcp::Capability;

/// CLI arguments for `git-mcp list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs, globals: &Globals) -> Result<()> {
    let rt = runtime()?;
    let (bridge, elapsed_ms) = rt.block_on(build_bridge_async(globals));
    let caps: Vec<&Capability> = bridge.catalog().iter().collect();

    if args.json {
        println!("{}", listing_json(&caps)?);
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(
            format!("{} Capabilities ({})", emoji("list", &style), caps.len()),
            Some(format!("root={} • {elapsed_ms} ms", globals.root.display())),
            &style,
        )
    );

    if caps.is_empty() {
        println!(
            "{}",
            color(
                Role::Dim,
                format!(
                    "{} (none) - is '{}' installed and on PATH?",
                    emoji("warn", &style),
                    globals.tool
                ),
                &style
            )
        );
        return Ok(());
    }

    println!("{}", table(&["NAME", "DESCRIPTION"], &rows(&caps), TableOpts::default(), &style));
    println!(
        "\n{} {}",
        emoji("info", &style),
        color(
            Role::Dim,
            "Use `git-mcp exec <name> --args \"...\"` to run one directly",
            &style
        )
    );
    Ok(())
}

fn listing_json(caps: &[&Capability]) -> Result<String> {
    Ok(serde_json::to_string_pretty(caps)?)
}

fn rows(caps: &[&Capability]) -> Vec<Vec<String>> {
    caps.iter()
        .map(|c| vec![c.name.clone(), c.description.replace('\n', " ")])
        .collect()
}
