// ABOUTME: Content digest newtype in the registry's algo:hex form.
// ABOUTME: Serializes as a plain string for JSON payloads and headers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid digest: {0}")]
pub struct ParseDigestError(String);

/// A manifest digest as the registry reports it, e.g.
/// `sha256:9f86d08...`. Compared byte-for-byte; two tags reference the
/// same image exactly when their digests are equal.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest {
    algo: String,
    hash: String,
}

impl Digest {
    pub fn algo(&self) -> &str {
        &self.algo
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((algo, hash)) if !algo.is_empty() && !hash.is_empty() => Ok(Digest {
                algo: algo.to_string(),
                hash: hash.to_string(),
            }),
            _ => Err(ParseDigestError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Digest {
    type Error = ParseDigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_string()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algo, self.hash)
    }
}
