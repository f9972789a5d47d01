use std::{fs, path::Path};

use tracing::debug;

use crate::{
    error::{CrackleError, CrackleResult},
    hash::HashFunction,
};

/// Decides whether a candidate reproduces a target digest.
///
/// The oracle holds no mutable state, so a single instance can be shared by
/// reference across every worker of a search.
#[derive(Clone, Debug)]
pub struct HashOracle {
    hash_function: HashFunction,
    target: Vec<u8>,
    salt: Option<String>,
}

impl HashOracle {
    /// Creates a new oracle for a hexadecimal target digest.
    /// The digest is case-insensitive and must have the size of the hash function output.
    pub fn new(
        target: &str,
        hash_function: HashFunction,
        salt: Option<String>,
    ) -> CrackleResult<Self> {
        let target = hex::decode(target.trim()).map_err(|_| CrackleError::InvalidDigest)?;

        if target.len() != hash_function.digest_size() {
            return Err(CrackleError::DigestLength {
                hash_function: hash_function.to_string(),
                expected: hash_function.digest_size(),
                actual: target.len(),
            });
        }

        Ok(Self {
            hash_function,
            target,
            // an empty salt hashes exactly like no salt at all
            salt: salt.filter(|salt| !salt.is_empty()),
        })
    }

    /// Returns true if `salt + candidate` hashes to the target digest.
    #[inline]
    pub fn verify(&self, candidate: &str) -> bool {
        let digest = match &self.salt {
            Some(salt) => {
                let mut input = String::with_capacity(salt.len() + candidate.len());
                input.push_str(salt);
                input.push_str(candidate);
                self.hash_function.digest(input.as_bytes())
            }
            None => self.hash_function.digest(candidate.as_bytes()),
        };

        digest == self.target
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    /// The target digest, in lowercase hexadecimal.
    pub fn target_hex(&self) -> String {
        hex::encode(&self.target)
    }
}

/// Guesses the hash function of a hexadecimal digest from its length alone.
///
/// This is a heuristic, not an identification: every function sharing a digest
/// length is indistinguishable (md5/md4/ntlm are all 32 characters long), so only
/// the most common function of each length is returned.
pub fn identify_algorithm(digest: &str) -> Option<HashFunction> {
    match digest.trim().len() {
        32 => Some(HashFunction::Md5),
        40 => Some(HashFunction::Sha1),
        64 => Some(HashFunction::Sha2_256),
        128 => Some(HashFunction::Sha2_512),
        _ => None,
    }
}

/// Reads a target digest.
/// `input` is either the digest itself or the path of a file whose first line is the digest.
pub fn load_target(input: &str) -> CrackleResult<String> {
    let path = Path::new(input);
    if !path.is_file() {
        return Ok(input.trim().to_owned());
    }

    debug!("Reading the target digest from {}", path.display());
    let content = fs::read_to_string(path)?;

    Ok(content.lines().next().unwrap_or_default().trim().to_owned())
}
