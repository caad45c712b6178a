//! Logger setup for the CLI.
//!
//! User-facing output goes through the `log` macros, so the default format is
//! the bare message. Verbose mode adds timestamps and levels.

use std::io::Write;

use log::LevelFilter;

/// Environment variable holding logger filters (falls back to `RUST_LOG`).
pub(crate) const LOG_ENV: &str = "QUESTLOG_LOG";

pub(crate) fn init(verbose: bool, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);

    let filters = std::env::var(LOG_ENV).or_else(|_| std::env::var("RUST_LOG"));
    if let Ok(filters) = filters {
        builder.parse_filters(&filters);
    }

    if verbose {
        builder.filter_level(LevelFilter::Debug);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        if quiet {
            builder.filter_level(LevelFilter::Warn);
        }
        // reqwest/hyper chatter stays out of normal output
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    let _ = builder.try_init();
}
