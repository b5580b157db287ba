fn main() {
    if let Err(error) = keyrelay_cli::run() {
        // Tracing is initialized inside run() after argument parsing.
        // If we get here, the subscriber is active, so report through it.
        tracing::error!(error = %format!("{error:#}"), "CLI execution failed");
        std::process::exit(1);
    }
}
