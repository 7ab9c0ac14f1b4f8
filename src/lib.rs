pub mod commands;
pub mod config;
pub mod db;
pub mod models;
pub mod pipeline;

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_ansi(colour_output(&std::io::stderr()))
        .with_writer(std::io::stderr)
        .init();
}

/// Colour codes only when the log sink is an interactive terminal.
fn colour_output(sink: &impl IsTerminal) -> bool {
    sink.is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirected_log_file_gets_no_colour() {
        let file = tempfile::tempfile().unwrap();
        assert!(!colour_output(&file));
    }
}
