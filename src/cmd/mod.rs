/*!
Subcommand dispatch.

  src/cmd/
    mod.rs     (this file)
    serve.rs   (ServeArgs + execute_serve)  MCP stdio server, the default
    list.rs    (ListArgs  + execute_list)   print the discovered catalog
    exec.rs    (ExecArgs  + execute_exec)   run one capability locally
    shared.rs  Globals, runtime, catalog build
    format.rs  table / box / color helpers for human output

Each subcommand module exposes one `execute_*(args, &Globals)` returning
`anyhow::Result<()>`.
*/

pub mod exec;
pub mod format;
pub mod list;
pub mod serve;
pub mod shared;

pub use exec::{ExecArgs, execute_exec};
pub use list::{ListArgs, execute_list};
pub use serve::{ServeArgs, execute_serve};
pub use shared::Globals;
