use std::{fmt::Display, str::FromStr};

use digest::Digest;
use md4::Md4;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::{
    error::{CrackleError, CrackleResult},
    ntlm::ntlm,
};

/// All the supported hash functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashFunction {
    Ntlm,
    Md4,
    Md5,
    Sha1,
    Sha2_224,
    Sha2_256,
    Sha2_384,
    Sha2_512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl HashFunction {
    /// Every supported hash function, in display order.
    pub const ALL: [HashFunction; 12] = [
        Self::Ntlm,
        Self::Md4,
        Self::Md5,
        Self::Sha1,
        Self::Sha2_224,
        Self::Sha2_256,
        Self::Sha2_384,
        Self::Sha2_512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
    ];

    /// Hashes a byte slice using the right hash function.
    #[inline]
    pub fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::Ntlm => ntlm(input).to_vec(),
            Self::Md4 => Md4::digest(input).to_vec(),
            Self::Md5 => Md5::digest(input).to_vec(),
            Self::Sha1 => Sha1::digest(input).to_vec(),
            Self::Sha2_224 => Sha224::digest(input).to_vec(),
            Self::Sha2_256 => Sha256::digest(input).to_vec(),
            Self::Sha2_384 => Sha384::digest(input).to_vec(),
            Self::Sha2_512 => Sha512::digest(input).to_vec(),
            Self::Sha3_224 => Sha3_224::digest(input).to_vec(),
            Self::Sha3_256 => Sha3_256::digest(input).to_vec(),
            Self::Sha3_384 => Sha3_384::digest(input).to_vec(),
            Self::Sha3_512 => Sha3_512::digest(input).to_vec(),
        }
    }

    /// Hashes a byte slice and returns the lowercase hexadecimal digest.
    pub fn hex_digest(&self, input: &[u8]) -> String {
        hex::encode(self.digest(input))
    }

    /// Gets the digest size in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            Self::Ntlm | Self::Md4 => <Md4 as Digest>::output_size(),
            Self::Md5 => <Md5 as Digest>::output_size(),
            Self::Sha1 => <Sha1 as Digest>::output_size(),
            Self::Sha2_224 => <Sha224 as Digest>::output_size(),
            Self::Sha2_256 => <Sha256 as Digest>::output_size(),
            Self::Sha2_384 => <Sha384 as Digest>::output_size(),
            Self::Sha2_512 => <Sha512 as Digest>::output_size(),
            Self::Sha3_224 => <Sha3_224 as Digest>::output_size(),
            Self::Sha3_256 => <Sha3_256 as Digest>::output_size(),
            Self::Sha3_384 => <Sha3_384 as Digest>::output_size(),
            Self::Sha3_512 => <Sha3_512 as Digest>::output_size(),
        }
    }

    /// The canonical lowercase name of the hash function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ntlm => "ntlm",
            Self::Md4 => "md4",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha2_224 => "sha224",
            Self::Sha2_256 => "sha256",
            Self::Sha2_384 => "sha384",
            Self::Sha2_512 => "sha512",
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
        }
    }
}

impl FromStr for HashFunction {
    type Err = CrackleError;

    fn from_str(s: &str) -> CrackleResult<Self> {
        let hash_function = match s.trim().to_ascii_lowercase().as_str() {
            "ntlm" => Self::Ntlm,
            "md4" => Self::Md4,
            "md5" => Self::Md5,
            "sha1" | "sha-1" => Self::Sha1,
            "sha224" | "sha-224" | "sha2-224" | "sha2_224" => Self::Sha2_224,
            "sha256" | "sha-256" | "sha2-256" | "sha2_256" => Self::Sha2_256,
            "sha384" | "sha-384" | "sha2-384" | "sha2_384" => Self::Sha2_384,
            "sha512" | "sha-512" | "sha2-512" | "sha2_512" => Self::Sha2_512,
            "sha3-224" | "sha3_224" => Self::Sha3_224,
            "sha3-256" | "sha3_256" => Self::Sha3_256,
            "sha3-384" | "sha3_384" => Self::Sha3_384,
            "sha3-512" | "sha3_512" => Self::Sha3_512,
            _ => return Err(CrackleError::UnsupportedAlgorithm(s.to_owned())),
        };

        Ok(hash_function)
    }
}

impl Display for HashFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
