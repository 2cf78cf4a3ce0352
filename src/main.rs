use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod git;
mod mcp;
mod utils;

use cmd::{ExecArgs, Globals, ListArgs, ServeArgs};

/// git-mcp - every git subcommand as an MCP tool
///
/// Layout:
///   git-mcp [serve]                         MCP server on stdio (default)
///   git-mcp list [--json]                   show discovered capabilities
///   git-mcp exec <name> [--args ..] [--cwd ..] [--json]
///
/// Capabilities are discovered from `git help -a` at startup; each one is
/// named `git-<subcommand>` and accepts `args` (free text) and `cwd`
/// (relative to --root).
///
/// Global flags:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   --root DIR      Directory `cwd` is resolved against (default: current dir)
///   --git PATH      git executable (default: git, git.exe on Windows)
///
/// Examples:
///   git-mcp
///   git-mcp list --json
///   git-mcp exec git-log --args "--oneline -n 5"
#[derive(Parser, Debug)]
#[command(
    name = "git-mcp",
    version,
    author,
    about = "git-mcp - expose git subcommands as MCP tools",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Root directory tool `cwd` parameters are resolved against
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// git executable to run
    #[arg(long = "git", global = true, value_name = "PATH")]
    git: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve capabilities over MCP stdio (default)
    Serve(ServeArgs),

    /// List discovered capabilities
    List(ListArgs),

    /// Execute one capability and print its output
    Exec(ExecArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let globals = Globals::resolve(cli.root, cli.git)?;

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => cmd::execute_serve(args, &globals),
        Commands::List(args) => cmd::execute_list(args, &globals),
        Commands::Exec(args) => cmd::execute_exec(args, &globals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["git-mcp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["git-mcp", "list", "--root", "/srv", "-vv"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/srv")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
