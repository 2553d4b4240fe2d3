use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};
use std::io::Write;

/// Every record becomes a DIMACS comment line, `c LEVEL - message`, so log
/// output can be interleaved with results on the same stream.
fn comment_builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()));
    builder
}

/// Level for the number of `-v` flags given on the command line.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn build_logger_for_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    comment_builder().filter_level(level).try_init()
}

/// Filtered by `RUST_LOG`, warnings only if unset.
pub fn build_logger() -> Result<(), SetLoggerError> {
    comment_builder().try_init()
}
