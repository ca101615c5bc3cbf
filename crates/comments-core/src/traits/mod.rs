//! Repository traits (ports)

mod repositories;

pub use repositories::{CommentRepository, RepoResult};
