//! Shared helpers for command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr while waiting on the network. Hidden with `--quiet`
/// or when stderr is not a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Echo a raw bridge response to stderr.
pub fn echo_response(body: &str) {
    eprintln!("Bridge response: {}", body.trim_end());
}
