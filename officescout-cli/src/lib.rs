//! Command-line interface for scoring candidate offices by what is nearby.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod score;

pub use error::CliError;

use score::ScoreArgs;

const ARG_SCORE_OFFICES: &str = "offices";
const ARG_SCORE_ADDRESS: &str = "address";
const ARG_SCORE_CATEGORY: &str = "category";
const ARG_SCORE_RADIUS_KM: &str = "radius-km";
const ARG_SCORE_CLIENT_ID: &str = "foursquare-client-id";
const ARG_SCORE_CLIENT_SECRET: &str = "foursquare-client-secret";
const ARG_SCORE_GEOCODE_URL: &str = "geocode-url";
const ARG_SCORE_FOURSQUARE_URL: &str = "foursquare-url";
const ENV_SCORE_OFFICES: &str = "OFFICESCOUT_CMDS_SCORE_OFFICES";
const ENV_SCORE_ADDRESS: &str = "OFFICESCOUT_CMDS_SCORE_ADDRESS";
const ENV_SCORE_CATEGORIES: &str = "OFFICESCOUT_CMDS_SCORE_CATEGORIES";
const ENV_SCORE_CLIENT_ID: &str = "OFFICESCOUT_CMDS_SCORE_FOURSQUARE_CLIENT_ID";
const ENV_SCORE_CLIENT_SECRET: &str = "OFFICESCOUT_CMDS_SCORE_FOURSQUARE_CLIENT_SECRET";

/// Run the officescout CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, an input
/// cannot be read, a collaborator fails, or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Score(args) => score::run_score(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "officescout",
    about = "Score candidate offices by the venues around them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count nearby venues per category and score each office.
    Score(ScoreArgs),
}

#[cfg(test)]
mod tests;
