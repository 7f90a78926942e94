use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let token_ttl_seconds = matches
        .get_one::<u64>("token-ttl")
        .copied()
        .unwrap_or(86400);
    let lower_threshold = matches
        .get_one::<f64>("biometric-lower-threshold")
        .copied()
        .unwrap_or(0.5);
    let upper_threshold = matches
        .get_one::<f64>("biometric-upper-threshold")
        .copied()
        .unwrap_or(1.5);

    if lower_threshold >= upper_threshold {
        anyhow::bail!(
            "biometric lower threshold ({lower_threshold}) must be below the upper threshold ({upper_threshold})"
        );
    }

    Ok(Action::Server(Args {
        port,
        dsn,
        token_ttl_seconds,
        lower_threshold,
        upper_threshold,
    }))
}
