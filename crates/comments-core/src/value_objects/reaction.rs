//! Reaction kinds and per-comment reaction membership
//!
//! `ReactionKind` is the single declaration point for the allowed reaction
//! set; adding a kind means adding a variant here and nothing else.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of reaction kinds a comment accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Heart,
    Laugh,
    Ok,
}

impl ReactionKind {
    /// All allowed kinds, in display order
    pub const ALL: [ReactionKind; 3] = [Self::Heart, Self::Laugh, Self::Ok];

    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Laugh => "laugh",
            Self::Ok => "ok",
        }
    }

    /// Parse a wire name; unknown names are rejected, never stored
    pub fn parse(s: &str) -> Result<Self, UnknownReactionKind> {
        match s {
            "heart" => Ok(Self::Heart),
            "laugh" => Ok(Self::Laugh),
            "ok" => Ok(Self::Ok),
            other => Err(UnknownReactionKind(other.to_string())),
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = UnknownReactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::parse(s)
    }
}

/// Error for a reaction name outside the allowed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reaction kind: {0}")]
pub struct UnknownReactionKind(pub String);

/// Per-comment reaction state: kind -> set of user ids currently reacted
///
/// Kinds with no members are never stored, so a fresh comment serializes
/// as `{}` and counts start at zero rather than as zero-valued entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionMap(BTreeMap<ReactionKind, BTreeSet<String>>);

impl ReactionMap {
    /// Create an empty reaction map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no kind has any member
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the user currently holds the given reaction
    #[must_use]
    pub fn has_reacted(&self, kind: ReactionKind, user_id: &str) -> bool {
        self.0.get(&kind).is_some_and(|users| users.contains(user_id))
    }

    /// Number of users currently holding the given reaction
    #[must_use]
    pub fn count(&self, kind: ReactionKind) -> usize {
        self.0.get(&kind).map_or(0, BTreeSet::len)
    }

    /// Record a membership loaded from storage (no toggle semantics)
    pub fn insert(&mut self, kind: ReactionKind, user_id: String) {
        self.0.entry(kind).or_default().insert(user_id);
    }

    /// Flip the user's membership for the kind.
    ///
    /// A kind not yet present behaves as an empty set, so the first toggle
    /// adds. Returns `true` when the user is a member after the flip.
    pub fn toggle(&mut self, kind: ReactionKind, user_id: &str) -> bool {
        let users = self.0.entry(kind).or_default();
        if users.remove(user_id) {
            // Empty sets are pruned so the map stays entry-free at zero
            if users.is_empty() {
                self.0.remove(&kind);
            }
            false
        } else {
            users.insert(user_id.to_string());
            true
        }
    }

    /// Iterate over (kind, members) pairs
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, &BTreeSet<String>)> {
        self.0.iter().map(|(kind, users)| (*kind, users))
    }
}
