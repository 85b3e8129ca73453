/*
[INPUT]:  Credentials, session cookies, mobile one-time tokens
[OUTPUT]: Session state and deduplicated refresh outcomes
[POS]:    Auth layer - handles eventdesk session lifecycle
[UPDATE]: When auth flow or session storage changes
*/

pub mod backend;
pub mod coordinator;
pub mod store;

pub use backend::{MockOutcome, MockSessionBackend, SessionBackend};
pub use coordinator::{RefreshHandle, SessionCoordinator};
pub use store::{MemorySessionStore, SessionData, SessionStore};
