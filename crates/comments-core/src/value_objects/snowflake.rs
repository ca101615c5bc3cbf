//! Snowflake comment ids
//!
//! A `Snowflake` packs a millisecond timestamp, a worker id, and a
//! per-millisecond sequence into a signed 64-bit integer, so ids sort by
//! creation time and stay unique across processes. On the wire they travel
//! as decimal strings because JavaScript numbers lose precision past 2^53.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Milliseconds between the Unix epoch and our id epoch (2024-01-01 UTC)
const ID_EPOCH_MS: i64 = 1_704_067_200_000;

const SEQUENCE_BITS: u32 = 12;
const WORKER_BITS: u32 = 10;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

/// Unique, time-ordered comment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse the decimal string form used on the wire
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>().map(Self).map_err(|_| SnowflakeParseError)
    }
}

/// The input was not a decimal 64-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a valid snowflake id")]
pub struct SnowflakeParseError;

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawOrString;

        impl serde::de::Visitor<'_> for RawOrString {
            type Value = Snowflake;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a snowflake id as a string or integer")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Snowflake, E> {
                i64::try_from(v)
                    .map(Snowflake)
                    .map_err(|_| E::custom("snowflake id out of range"))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Snowflake, E> {
                Snowflake::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RawOrString)
    }
}

/// Process-wide id generator
///
/// The whole (timestamp, sequence) pair lives in one atomic word, advanced
/// with a compare-and-swap loop, so concurrent callers never hand out the
/// same id and never need a lock.
pub struct SnowflakeGenerator {
    worker_id: u16,
    // (millis since ID_EPOCH_MS) << SEQUENCE_BITS | sequence
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics when `worker_id` does not fit in 10 bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(
            worker_id <= MAX_WORKER_ID,
            "worker id must fit in {WORKER_BITS} bits"
        );
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Produce the next unique id
    pub fn generate(&self) -> Snowflake {
        let next = loop {
            let now = now_since_epoch();
            let current = self.state.load(Ordering::Acquire);
            let current_ms = current >> SEQUENCE_BITS;

            let candidate = if now > current_ms {
                now << SEQUENCE_BITS
            } else {
                // Same millisecond (or the clock stepped back): bump the
                // sequence, rolling into the next millisecond slot when
                // all 4096 values are spent.
                current + 1
            };

            if self
                .state
                .compare_exchange_weak(current, candidate, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                break candidate;
            }
        };

        let millis = next >> SEQUENCE_BITS;
        let sequence = next & SEQUENCE_MASK;
        Snowflake((millis << (SEQUENCE_BITS + WORKER_BITS)) | (i64::from(self.worker_id) << SEQUENCE_BITS) | sequence)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn now_since_epoch() -> i64 {
    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    i64::try_from(unix_ms).unwrap_or(i64::MAX) - ID_EPOCH_MS
}
