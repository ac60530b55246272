//! Certificate identifiers
//!
//! Identifiers look like `CERT-2025-0317`: the issuing year followed by a
//! zero-padded suffix drawn uniformly from `[0, 10000)`. The suffix space is
//! small, so uniqueness is enforced by the store and not by the generator.

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use chrono::{Datelike, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const ID_PREFIX: &str = "CERT";

/// Number of distinct suffixes per year
pub const SUFFIX_SPACE: u16 = 10_000;

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CERT-[0-9]{4}-[0-9]{4}$").expect("static regex"));

/// A validated certificate identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CertificateId(String);

impl CertificateId {
    /// Build an identifier from its parts. `suffix` is reduced into the suffix space.
    pub fn new(year: i32, suffix: u16) -> Self {
        Self(format!(
            "{ID_PREFIX}-{:04}-{:04}",
            year.rem_euclid(10_000),
            suffix % SUFFIX_SPACE
        ))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        if ID_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        self.0
            .get(5 .. 9)
            .and_then(|year| year.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CertificateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CertificateId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CertificateId> for String {
    fn from(id: CertificateId) -> Self {
        id.0
    }
}

/// Source of identifier suffixes
pub trait SuffixSource: Send + Sync {
    /// Next suffix, expected in `[0, SUFFIX_SPACE)`
    fn next_suffix(&self) -> u16;
}

/// Uniform suffixes from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl SuffixSource for ThreadRngSource {
    fn next_suffix(&self) -> u16 {
        rand::rng().random_range(0 .. SUFFIX_SPACE)
    }
}

/// Issues identifiers for the current UTC year
#[derive(Clone)]
pub struct IdGenerator {
    source: Arc<dyn SuffixSource>,
}

impl IdGenerator {
    pub fn new(source: Arc<dyn SuffixSource>) -> Self {
        Self { source }
    }

    pub fn next_id(&self) -> CertificateId {
        self.next_id_for_year(Utc::now().year())
    }

    pub fn next_id_for_year(&self, year: i32) -> CertificateId {
        CertificateId::new(year, self.source.next_suffix())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngSource))
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
