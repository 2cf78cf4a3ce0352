//! End-to-end: spawn the `git-mcp` binary as an MCP child process against a
//! scripted stand-in for git and talk to it with the rmcp client.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use rmcp::model::{CallToolRequestParam, Content};
use rmcp::{RoleClient, ServiceExt};
use rmcp::service::RunningService;
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use tokio::process::Command;

const FAKE_GIT: &str = r#"#!/bin/sh
if [ "$1" = "help" ]; then
  cat <<'EOF'
See 'git help <command>' to read about a specific subcommand

Main Porcelain Commands
   status         Show the working tree status
   gui            A portable graphical interface to Git
   log            Show commit logs

Low-level Commands / Internal Helpers
   rev-parse      Pick out and massage parameters
EOF
  exit 0
fi
if [ "$1" = "status" ]; then
  echo clean
  exit 0
fi
if [ "$1" = "rev-parse" ]; then
  pwd
  exit 0
fi
printf 'fatal: not a repository' >&2
exit 1
"#;

fn write_fake_git(dir: &Path) -> PathBuf {
    let path = dir.join("fake-git");
    std::fs::write(&path, FAKE_GIT).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn texts(content: &[Content]) -> Vec<String> {
    content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect()
}

/// Start the server with its stderr (logs) discarded.
async fn start_server(configure: impl FnOnce(&mut Command)) -> RunningService<RoleClient, ()> {
    let cmd = Command::new(env!("CARGO_BIN_EXE_git-mcp")).configure(configure);
    let (transport, _stderr) = TokioChildProcess::builder(cmd)
        .stderr(std::process::Stdio::null())
        .spawn()
        .unwrap();
    ().serve(transport).await.expect("server initializes")
}

fn arguments(v: serde_json::Value) -> Option<serde_json::Map<String, serde_json::Value>> {
    v.as_object().cloned()
}

#[tokio::test]
async fn serves_discovered_git_commands_over_stdio() {
    let dir = tempfile::tempdir().unwrap();
    let fake = write_fake_git(dir.path());
    std::fs::create_dir(dir.path().join("repo")).unwrap();

    let service = start_server(|c| {
        c.arg("--git")
            .arg(&fake)
            .arg("--root")
            .arg(dir.path())
            .arg("serve");
    })
    .await;

    let tools = service.list_tools(Default::default()).await.unwrap();
    let names: Vec<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
    assert_eq!(names, vec!["git-status", "git-log", "git-rev-parse"]);
    assert_eq!(
        tools.tools[0].description.as_deref(),
        Some("Executes 'git status': Show the working tree status")
    );

    // Success: stdout only.
    let ok = service
        .call_tool(CallToolRequestParam {
            name: "git-status".into(),
            arguments: None,
        })
        .await
        .unwrap();
    assert_eq!(texts(&ok.content), vec!["STDOUT:\nclean\n".to_string()]);

    // Tool failure is content, not a protocol fault.
    let failed = service
        .call_tool(CallToolRequestParam {
            name: "git-log".into(),
            arguments: arguments(serde_json::json!({"args": "--oneline"})),
        })
        .await
        .unwrap();
    assert_eq!(failed.is_error, Some(true));
    let failed_texts = texts(&failed.content);
    assert!(failed_texts.contains(&"STDERR:\nfatal: not a repository".to_string()));
    assert!(failed_texts.iter().any(|t| t.starts_with("ERROR:\n")));

    // cwd resolves against --root.
    let in_repo = service
        .call_tool(CallToolRequestParam {
            name: "git-rev-parse".into(),
            arguments: arguments(serde_json::json!({"cwd": "repo"})),
        })
        .await
        .unwrap();
    assert!(texts(&in_repo.content)[0].trim_end().ends_with("/repo"));

    // Unknown capability is a protocol-level error.
    let unknown = service
        .call_tool(CallToolRequestParam {
            name: "git-gui".into(),
            arguments: None,
        })
        .await;
    let err = unknown.unwrap_err();
    assert!(err.to_string().contains("git-gui"), "{err}");

    let _ = service.cancel().await;
}

#[tokio::test]
async fn missing_git_still_serves_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let service = start_server(|c| {
        c.arg("--git")
            .arg(dir.path().join("no-such-git"))
            .arg("--root")
            .arg(dir.path());
    })
    .await;

    let tools = service.list_tools(Default::default()).await.unwrap();
    assert!(tools.tools.is_empty());

    let _ = service.cancel().await;
}
