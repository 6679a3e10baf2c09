//! # Campus ERP Session
//!
//! The authentication state of the client.
//!
//! ## Components
//!
//! - `SessionStore` - holds the bearer token, persists it, broadcasts changes
//! - `TokenStorage` - where the token survives between runs
//! - `Claims` - unverified view of the token payload
//! - `ProfileResolver` - turns a token into the signed-in user's profile

pub mod claims;
pub mod resolver;
pub mod store;

pub use claims::Claims;
pub use resolver::{ProfileResolver, ProfileSource, ResolveState};
pub use store::{FileTokenStorage, MemoryTokenStorage, SessionState, SessionStore, TokenStorage, TOKEN_KEY};
