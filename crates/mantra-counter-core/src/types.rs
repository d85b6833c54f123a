//! Strong type definitions for the mantra counter.
//!
//! The target is a newtype so a zero or negative target cannot exist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::error::TargetError;

/// Target used when nothing has been persisted yet.
pub const DEFAULT_TARGET: Target = match Target::new(108) {
    Some(t) => t,
    None => panic!("default target must be positive"),
};

/// A positive count goal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Target(NonZeroU64);

impl Target {
    /// Create a target, returning `None` for zero.
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Parse user or persisted text.
    ///
    /// Leading whitespace and an optional sign are followed by the leading
    /// run of decimal digits; anything after the digits is ignored, so
    /// `"42abc"` and `"4.5"` read as 42 and 4. No digits, or more than
    /// `i64::MAX`, is `NotANumber`; zero and negatives are `NotPositive`.
    pub fn parse(candidate: &str) -> Result<Self, TargetError> {
        let trimmed = candidate.trim();
        let not_a_number = || TargetError::NotANumber(trimmed.to_string());

        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let magnitude: i64 = rest[..end].parse().map_err(|_| not_a_number())?;

        let value = if negative { -magnitude } else { magnitude };
        if value <= 0 {
            return Err(TargetError::NotPositive(value));
        }
        // value > 0 here, so the cast is lossless
        Self::new(value as u64).ok_or(TargetError::NotPositive(value))
    }
}

impl Default for Target {
    fn default() -> Self {
        DEFAULT_TARGET
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Target {
    type Error = TargetError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(TargetError::NotPositive(0))
    }
}

impl From<Target> for u64 {
    fn from(target: Target) -> Self {
        target.get()
    }
}
