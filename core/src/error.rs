use std::{io, path::PathBuf};

use thiserror::Error;

pub type CrackleResult<T> = std::result::Result<T, CrackleError>;

#[derive(Error, Debug)]
pub enum CrackleError {
    #[error("Unsupported hash algorithm \"{0}\"")]
    UnsupportedAlgorithm(String),

    #[error("Unknown attack method \"{0}\". Use one of: dictionary, brute_force, hybrid")]
    UnknownAttack(String),

    #[error("Unknown hybrid placement \"{0}\". Use one of: suffix, prefix, both")]
    UnknownPlacement(String),

    #[error("The minimum length ({min}) is greater than the maximum length ({max})")]
    LengthRange { min: u32, max: u32 },

    #[error("The maximum length ({0}) exceeds the limit of {1}")]
    LengthTooLong(u32, u32),

    #[error("The charset is empty")]
    EmptyCharset,

    #[error("The hybrid segment table would hold {0} segments, which exceeds the limit of {1}")]
    SegmentSpace(String, usize),

    #[error("The digest is not valid hexadecimal")]
    InvalidDigest,

    #[error("The digest is {actual} bytes long but {hash_function} digests are {expected} bytes long")]
    DigestLength {
        hash_function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unable to read the wordlist at {}", path.display())]
    Wordlist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to start the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("The search thread panicked")]
    Join,

    #[error(
        "Unable to access the file at the given path. Make sure the right permissions are available"
    )]
    Io(#[from] io::Error),
}
