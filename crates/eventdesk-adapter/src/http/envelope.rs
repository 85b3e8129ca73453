/*
[INPUT]:  Raw `{ code, data, msg }` response bodies
[OUTPUT]: Unwrapped payloads or API errors
[POS]:    HTTP layer - backend response envelope
[UPDATE]: When the envelope convention changes
*/

use serde::{Deserialize, Serialize};

use super::error::{ApiError, DEFAULT_ERROR_MESSAGE, Result};

/// Code signalling success
pub const SUCCESS_CODE: i64 = 0;

/// Response wrapper used by every backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Fail with the server message (or the default message) unless `code == 0`.
    pub fn check(self) -> Result<Option<T>> {
        if self.is_success() {
            return Ok(self.data);
        }

        let message = self
            .msg
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        Err(ApiError::Api {
            code: self.code,
            message,
        })
    }

    /// Unwrap `data`, treating a successful envelope without data as invalid.
    pub fn into_data(self) -> Result<T> {
        self.check()?.ok_or_else(|| {
            ApiError::InvalidResponse("successful response is missing data".to_string())
        })
    }
}
