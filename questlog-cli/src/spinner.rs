//! Progress spinner shared by the commands.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a ticking spinner, or a hidden one when `quiet` is set.
pub(crate) fn new_spinner(quiet: bool, msg: impl Into<String>) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
