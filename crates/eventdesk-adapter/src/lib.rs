/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public eventdesk adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod task;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    MemorySessionStore,
    RefreshHandle,
    SessionBackend,
    SessionCoordinator,
    SessionStore,
};

// Re-export commonly used types from http
pub use http::{
    ApiError,
    ClientConfig,
    Envelope,
    EventdeskClient,
    Result,
    TaskActionCommand,
};

// Re-export the lifecycle engine entry points
pub use task::{
    ActionMeta,
    ActionOption,
    AssignableMember,
    Role,
    StatusStyle,
    TaskBoard,
    TransitionError,
};

// Re-export all types
pub use types::*;
