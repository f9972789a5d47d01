mod attack;
mod hash;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Context, Result};
use clap::{value_parser, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crackle_core::{
    identify_algorithm, load_target, HashFunction, HashOracle, Placement, WordSource,
    DEFAULT_BATCH_SIZE, DEFAULT_CHARSET, DEFAULT_CONCURRENCY, DEFAULT_HYBRID_CHARSET,
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_SEGMENT_LENGTH, MAX_BRUTE_FORCE_LENGTH,
};

use attack::{brute_force, dictionary, hybrid};
use hash::{hash, identify};

/// Password hash cracker using dictionary, brute-force and hybrid attacks.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs. Ignored if RUST_LOG is set.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Dictionary(Dictionary),
    BruteForce(BruteForce),
    Hybrid(Hybrid),
    Hash(Hash),
    Identify(Identify),
}

/// The digest to crack and how to search for it.
#[derive(Args)]
pub struct Target {
    /// The digest to crack, in hexadecimal, or a file whose first line is the digest.
    digest: String,

    /// The hash function used to produce the digest.
    /// Guessed from the length of the digest if not specified.
    #[clap(short, long)]
    algorithm: Option<HashFunction>,

    /// A salt prepended to every candidate before hashing.
    #[clap(short, long)]
    salt: Option<String>,

    /// The number of worker threads.
    #[clap(short, long, value_parser = value_parser!(u64).range(1..=1024), default_value_t = DEFAULT_CONCURRENCY as u64)]
    threads: u64,

    /// The number of candidates handed to a worker at once.
    #[clap(long, value_parser = value_parser!(u64).range(1..), default_value_t = DEFAULT_BATCH_SIZE as u64)]
    batch_size: u64,

    /// Print the result as JSON.
    #[clap(long)]
    json: bool,
}

impl Target {
    /// Builds the oracle checking candidates against the digest.
    fn oracle(&self) -> Result<HashOracle> {
        let digest = load_target(&self.digest)?;

        let hash_function = match self.algorithm {
            Some(hash_function) => hash_function,
            None => identify_algorithm(&digest).context(
                "Unable to guess the hash function from the digest, use --algorithm to specify it",
            )?,
        };

        Ok(HashOracle::new(&digest, hash_function, self.salt.clone())?)
    }
}

/// Where the words come from.
#[derive(Args)]
pub struct Words {
    /// A wordlist with one word per line.
    #[clap(short, long, required_unless_present = "advice", conflicts_with = "advice")]
    wordlist: Option<PathBuf>,

    /// A file holding the output of a strategy advisor, as a JSON list of words.
    #[clap(long)]
    advice: Option<PathBuf>,
}

impl Words {
    fn source(&self) -> Result<WordSource> {
        match (&self.wordlist, &self.advice) {
            (Some(path), _) => Ok(WordSource::file(path)),
            (None, Some(path)) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Unable to read the advice at {}", path.display()))?;
                Ok(WordSource::from_advice(&text))
            }
            (None, None) => bail!("Either a wordlist or an advice file is required"),
        }
    }
}

/// Try every word of a wordlist.
#[derive(Args)]
pub struct Dictionary {
    #[clap(flatten)]
    target: Target,

    #[clap(flatten)]
    words: Words,

    /// Also try common variations of every word (capitalization, numbers, symbols).
    #[clap(short, long)]
    mutations: bool,
}

/// Try every string up to a certain length.
#[derive(Args)]
pub struct BruteForce {
    #[clap(flatten)]
    target: Target,

    /// The minimum candidate length.
    #[clap(long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_len: u32,

    /// The maximum candidate length.
    #[clap(long, value_parser = value_parser!(u32).range(..=MAX_BRUTE_FORCE_LENGTH as i64), default_value_t = DEFAULT_MAX_LENGTH)]
    max_len: u32,

    /// A charset preset (lowercase, uppercase, digits, special, alphanumeric, all)
    /// or the characters to use.
    #[clap(short, long, default_value = DEFAULT_CHARSET)]
    charset: String,
}

/// Try every word of a wordlist combined with short brute-forced segments.
#[derive(Args)]
pub struct Hybrid {
    #[clap(flatten)]
    target: Target,

    #[clap(flatten)]
    words: Words,

    /// The length of the segment added to every word.
    #[clap(long, value_parser = value_parser!(u32).range(1..), default_value_t = DEFAULT_SEGMENT_LENGTH)]
    append_len: u32,

    /// A charset preset or the characters to use for the segments.
    #[clap(short, long, default_value = DEFAULT_HYBRID_CHARSET)]
    charset: String,

    /// Where the segment goes (suffix, prefix or both).
    #[clap(long, default_value_t = Placement::Suffix)]
    hybrid_mode: Placement,
}

/// Hash a password.
#[derive(Args)]
pub struct Hash {
    password: String,

    /// The hash function to use.
    #[clap(short, long, default_value_t = HashFunction::Md5)]
    algorithm: HashFunction,

    /// A salt prepended to the password.
    #[clap(short, long)]
    salt: Option<String>,
}

/// Guess the hash function that produced a digest.
#[derive(Args)]
pub struct Identify {
    /// The digest, in hexadecimal, or a file whose first line is the digest.
    digest: String,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.commands {
        Commands::Dictionary(dict) => dictionary(dict)?,
        Commands::BruteForce(bf) => brute_force(bf)?,
        Commands::Hybrid(hyb) => hybrid(hyb)?,
        Commands::Hash(h) => hash(h)?,
        Commands::Identify(id) => identify(id)?,
    };

    Ok(exit_code)
}
