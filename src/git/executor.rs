/*!
executor.rs - run `git <token> <args>` as a child process.

The composed command line goes through the platform shell (`sh -c` /
`cmd /C`) so quoted arguments in the free-text argument string keep their
meaning. Only the program path is quoted; the token and argument text are
passed verbatim. Callers are trusted.

No timeout: a hung child hangs its invocation.
*/

use std::borrow::Cow;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use super::GitTool;

/// Outcome of one git invocation. Failures are data, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub succeeded: bool,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub error_message: Option<String>,
}

impl ExecutionResult {
    fn spawn_failure(message: String) -> Self {
        Self {
            succeeded: false,
            stdout: None,
            stderr: None,
            error_message: Some(message),
        }
    }
}

/// Quote the program path for the platform shell.
#[cfg(not(windows))]
fn quote_program(program: &str) -> Cow<'_, str> {
    shell_words::quote(program)
}

/// Quote the program path for the platform shell; `cmd` only understands double quotes.
#[cfg(windows)]
fn quote_program(program: &str) -> Cow<'_, str> {
    const SPECIAL: &[char] = &[' ', '\t', '&', '|', '<', '>', '^', '(', ')', '%', '!', ','];
    if program.contains(SPECIAL) {
        Cow::Owned(format!("\"{program}\""))
    } else {
        Cow::Borrowed(program)
    }
}

/// Build `<program> <token> <args>`; empty parts add no separator.
pub fn compose_command(tool: &GitTool, token: &str, args: &str) -> String {
    let program = quote_program(tool.program());
    [program.as_ref(), token, args]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        // Passed raw: std's argument quoting would escape inner quotes as \" which cmd keeps.
        let mut c = Command::new("cmd");
        c.raw_arg(format!("/C \"{command_line}\""));
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    }
}

/// Run one git subcommand in `working_dir` and capture everything it printed.
pub async fn execute(tool: &GitTool, token: &str, args: &str, working_dir: &Path) -> ExecutionResult {
    let command_line = compose_command(tool, token, args);
    tracing::debug!(command = %command_line, cwd = %working_dir.display(), "executing");

    let output = match shell_command(&command_line)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
    {
        Ok(o) => o,
        Err(e) => {
            tracing::debug!(error = %e, "spawn failed");
            return ExecutionResult::spawn_failure(format!(
                "Failed to run '{command_line}' in {}: {e}",
                working_dir.display()
            ));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        ExecutionResult {
            succeeded: true,
            stdout: Some(stdout),
            stderr: Some(stderr),
            error_message: None,
        }
    } else {
        tracing::debug!(status = %output.status, "command exited unsuccessfully");
        ExecutionResult {
            succeeded: false,
            stdout: Some(stdout),
            stderr: Some(stderr),
            error_message: Some(format!("Command failed ({}): {command_line}", output.status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_joins_with_single_spaces() {
        let tool = GitTool::new("git");
        assert_eq!(compose_command(&tool, "log", "--oneline -n 5"), "git log --oneline -n 5");
        assert_eq!(compose_command(&tool, "status", ""), "git status");
    }

    #[test]
    fn compose_passes_args_verbatim() {
        let tool = GitTool::new("git");
        assert_eq!(
            compose_command(&tool, "commit", r#"-m "fix: it's fine""#),
            r#"git commit -m "fix: it's fine""#
        );
    }

    #[cfg(windows)]
    #[test]
    fn compose_uses_double_quotes_on_windows() {
        let tool = GitTool::new(r"C:\Program Files\Git\cmd\git.exe");
        assert_eq!(
            compose_command(&tool, "commit", r#"-m "two words""#),
            r#""C:\Program Files\Git\cmd\git.exe" commit -m "two words""#
        );
        assert_eq!(
            compose_command(&GitTool::new("git.exe"), "status", ""),
            "git.exe status"
        );
    }

    #[cfg(windows)]
    #[tokio::test]
    async fn quoted_argument_survives_cmd() {
        let dir = tempfile::tempdir().unwrap();
        let res = execute(&GitTool::new("echo"), "", r#""two words""#, dir.path()).await;
        assert!(res.succeeded);
        assert_eq!(res.stdout.as_deref().map(str::trim_end), Some(r#""two words""#));
    }

    #[cfg(unix)]
    #[test]
    fn compose_quotes_program_path_only() {
        let tool = GitTool::new("/opt/my tools/git");
        assert_eq!(compose_command(&tool, "status", "-s"), "'/opt/my tools/git' status -s");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn success_captures_stdout_and_empty_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let res = execute(&GitTool::new("echo"), "clean", "", dir.path()).await;
        assert_eq!(
            res,
            ExecutionResult {
                succeeded: true,
                stdout: Some("clean\n".into()),
                stderr: Some(String::new()),
                error_message: None,
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_on_success_is_not_failure() {
        let dir = tempfile::tempdir().unwrap();
        let res = execute(&GitTool::new("sh"), "-c", "'echo note >&2'", dir.path()).await;
        assert!(res.succeeded);
        assert_eq!(res.stderr.as_deref(), Some("note\n"));
        assert!(res.error_message.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_reports_failure_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let res = execute(
            &GitTool::new("sh"),
            "-c",
            "'printf \"fatal: not a repository\" >&2; exit 1'",
            dir.path(),
        )
        .await;
        assert!(!res.succeeded);
        assert_eq!(res.stderr.as_deref(), Some("fatal: not a repository"));
        let msg = res.error_message.unwrap();
        assert!(!msg.is_empty());
        assert!(msg.contains("Command failed"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let res = execute(&GitTool::new("ls"), "", "", dir.path()).await;
        assert!(res.succeeded);
        assert!(res.stdout.unwrap().contains("marker.txt"));
    }

    #[tokio::test]
    async fn missing_working_dir_is_failure_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");
        let res = execute(&GitTool::default(), "status", "", &gone).await;
        assert!(!res.succeeded);
        assert!(res.stdout.is_none());
        assert!(res.stderr.is_none());
        assert!(res.error_message.unwrap().contains("does-not-exist"));
    }
}
