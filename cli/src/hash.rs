use std::process::ExitCode;

use anyhow::{Context, Result};
use crackle_core::{identify_algorithm, load_target};

use crate::{Hash, Identify};

pub fn hash(args: Hash) -> Result<ExitCode> {
    let input = format!("{}{}", args.salt.unwrap_or_default(), args.password);
    println!("{}", args.algorithm.hex_digest(input.as_bytes()));

    Ok(ExitCode::SUCCESS)
}

pub fn identify(args: Identify) -> Result<ExitCode> {
    let digest = load_target(&args.digest)?;
    let hash_function =
        identify_algorithm(&digest).context("The digest does not look like a known hash")?;

    println!("{hash_function}");

    Ok(ExitCode::SUCCESS)
}
