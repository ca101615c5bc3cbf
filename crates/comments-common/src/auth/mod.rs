//! Identity provider adapter - session token verification

mod session;

pub use session::{SessionClaims, SessionError, SessionVerifier};
