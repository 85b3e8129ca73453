/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod envelope;
pub mod error;
pub mod events;
pub mod session;
pub mod tasks;

pub use error::{ApiError, DEFAULT_ERROR_MESSAGE, Result};
pub use envelope::{Envelope, SUCCESS_CODE};
pub use tasks::TaskActionCommand;

pub use client::{ClientConfig, DEFAULT_BASE_URL, EventdeskClient};
