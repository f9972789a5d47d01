pub mod advisor;
pub mod charset;
pub mod error;
pub mod event;
pub mod generator;
pub mod hash;
mod ntlm;
pub mod oracle;
pub mod search;
pub mod wordlist;

pub use {
    charset::CharSet,
    error::{CrackleError, CrackleResult},
    event::{Event, SearchHandle},
    generator::{AttackKind, AttackSpec, Candidates, Placement},
    hash::HashFunction,
    oracle::{identify_algorithm, load_target, HashOracle},
    search::{
        CancellationToken, SearchCoordinator, SearchCoordinatorBuilder, SearchResult, SearchState,
    },
    wordlist::WordSource,
};

/// The default number of candidates handed to a worker at once.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// The default number of workers.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// The default minimum brute-force length.
pub const DEFAULT_MIN_LENGTH: u32 = 1;

/// The default maximum brute-force length.
pub const DEFAULT_MAX_LENGTH: u32 = 4;

/// The default brute-force charset.
pub const DEFAULT_CHARSET: &str = "lowercase";

/// The default length of the segment appended or prepended to words in a hybrid attack.
pub const DEFAULT_SEGMENT_LENGTH: u32 = 2;

/// The default hybrid charset.
pub const DEFAULT_HYBRID_CHARSET: &str = "digits";

/// The maximum brute-force length allowed.
pub const MAX_BRUTE_FORCE_LENGTH: u32 = 64;

/// The maximum number of hybrid segments held in memory.
pub const MAX_HYBRID_SEGMENTS: usize = 10_000_000;
