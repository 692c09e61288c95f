//! Logger setup for the censor binary.

use log::LevelFilter;

/// Initializes `env_logger`.
///
/// With `level` set, it overrides `RUST_LOG`; otherwise `RUST_LOG` decides and
/// defaults to warnings only.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    // A second initialization in the same process is not an error for the CLI.
    let _ = builder.try_init();
}
