/*
[INPUT]:  Login credentials, session cookie, mobile one-time token
[OUTPUT]: Session payloads (current user) from auth endpoints
[POS]:    HTTP layer - auth endpoints backing the session coordinator
[UPDATE]: When auth endpoints or payloads change
*/

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::auth::SessionBackend;
use crate::http::{EventdeskClient, Result};
use crate::types::{LoginRequest, MobileTokenRequest, SessionPayload};

#[async_trait]
impl SessionBackend for EventdeskClient {
    /// POST /api/auth/login
    async fn login(&self, request: &LoginRequest) -> Result<SessionPayload> {
        debug!(username = %request.username, "login request");
        let builder = self.request(Method::POST, "/api/auth/login")?.json(request);
        self.send_envelope(builder).await
    }

    /// POST /api/auth/logout
    async fn logout(&self) -> Result<()> {
        let builder = self.request(Method::POST, "/api/auth/logout")?;
        self.send_ack(builder).await
    }

    /// POST /api/auth/refresh
    async fn refresh(&self) -> Result<SessionPayload> {
        let builder = self.request(Method::POST, "/api/auth/refresh")?;
        self.send_envelope(builder).await
    }

    /// POST /api/auth/mobile/verify
    async fn verify_mobile_token(&self, token: &str) -> Result<SessionPayload> {
        let body = MobileTokenRequest {
            token: token.to_string(),
        };
        let builder = self
            .request(Method::POST, "/api/auth/mobile/verify")?
            .json(&body);
        self.send_envelope(builder).await
    }
}
