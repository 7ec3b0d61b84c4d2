mod types;
mod validation;

pub use types::*;
pub use validation::*;

use clap::Parser;

/// Parses the command line (and its environment fallbacks) into checked
/// arguments.
///
/// # Errors
///
/// Will return `Err` if the parsed arguments fail validation
pub fn args_checks() -> Result<CleanArgs, String> {
    Args::parse().validate()
}
