//! Value objects - immutable domain primitives

mod reaction;
mod snowflake;

pub use reaction::{ReactionKind, ReactionMap, UnknownReactionKind};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
