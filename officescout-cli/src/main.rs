//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use officescout_cli::{CliError, run};

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    match run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("officescout: {err}");
            std::process::exit(1);
        }
    }
}
