/*
[INPUT]:  Credentials, ambient session cookie, or mobile one-time token
[OUTPUT]: Session payloads from the backend auth endpoints
[POS]:    Auth layer - backend abstraction used by the refresh coordinator
[UPDATE]: When auth endpoints are added or their payloads change
*/

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::http::{ApiError, Result};
use crate::types::{LoginRequest, SessionPayload, User};

/// Auth endpoints the session coordinator depends on.
///
/// Implemented by [`crate::EventdeskClient`]; tests substitute
/// [`MockSessionBackend`].
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<SessionPayload>;

    async fn logout(&self) -> Result<()>;

    /// Re-validate the ambient session cookie
    async fn refresh(&self) -> Result<SessionPayload>;

    /// Exchange a mobile one-time token for a session
    async fn verify_mobile_token(&self, token: &str) -> Result<SessionPayload>;
}

/// Scripted outcome for [`MockSessionBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    User(User),
    NoUser,
    Fail(String),
}

impl MockOutcome {
    fn into_result(self) -> Result<SessionPayload> {
        match self {
            MockOutcome::User(user) => Ok(SessionPayload { user: Some(user) }),
            MockOutcome::NoUser => Ok(SessionPayload::default()),
            MockOutcome::Fail(message) => Err(ApiError::Unauthorized { message }),
        }
    }
}

/// Mock backend for testing: pops one scripted outcome per call, after an
/// optional delay, and counts calls per endpoint.
#[derive(Debug, Default)]
pub struct MockSessionBackend {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    delay: Duration,
    refresh_calls: AtomicUsize,
    mobile_calls: AtomicUsize,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl MockSessionBackend {
    pub fn new(outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn mobile_calls(&self) -> usize {
        self.mobile_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    async fn next(&self) -> Result<SessionPayload> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let outcome = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Fail("no scripted outcome".to_string()));
        outcome.into_result()
    }
}

#[async_trait]
impl SessionBackend for MockSessionBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<SessionPayload> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.next().await
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.next().await.map(|_| ())
    }

    async fn refresh(&self) -> Result<SessionPayload> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.next().await
    }

    async fn verify_mobile_token(&self, _token: &str) -> Result<SessionPayload> {
        self.mobile_calls.fetch_add(1, Ordering::SeqCst);
        self.next().await
    }
}
