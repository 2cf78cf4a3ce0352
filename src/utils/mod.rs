//! Utilities: logging setup.
//!
//! Logs always go to stderr; stdout belongs to the MCP transport (serve) or
//! to command output (list / exec).

pub mod logging {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    /// Map -v / -q flags to a level: quiet -> ERROR, 0 -> INFO, 1 -> DEBUG, 2+ -> TRACE.
    pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::ERROR;
        }
        match verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Install the global subscriber. `RUST_LOG`, when set, wins over the flag-derived level.
    pub fn init_logging(level: LevelFilter) {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();

        // A second init (tests) is not an error worth surfacing.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

}

pub use logging::{derive_level, init_logging};
