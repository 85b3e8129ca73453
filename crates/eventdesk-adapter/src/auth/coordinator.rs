/*
[INPUT]:  Session backend, session store, refresh/login/logout requests
[OUTPUT]: Deduplicated refresh outcomes and an up-to-date session store
[POS]:    Auth layer - orchestrates session lifecycle
[UPDATE]: When auth flow steps or refresh semantics change
*/

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::backend::SessionBackend;
use super::store::SessionStore;
use crate::http::{ApiError, Result};
use crate::types::{LoginRequest, User};

/// Handle to a (possibly shared) refresh operation.
///
/// Resolves to `true` when the session was re-established and `false` on any
/// failure. Never errors.
#[derive(Clone)]
pub struct RefreshHandle {
    inner: Shared<BoxFuture<'static, bool>>,
}

impl RefreshHandle {
    fn settled(outcome: bool) -> Self {
        Self {
            inner: futures_util::future::ready(outcome).boxed().shared(),
        }
    }

    /// Whether both handles refer to the same underlying operation.
    ///
    /// Only meaningful before either handle has been awaited to completion.
    pub fn same_operation(&self, other: &RefreshHandle) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for RefreshHandle {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

impl fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("done", &self.inner.peek().is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshKind {
    Session,
    Mobile,
}

enum RefreshRequest {
    Session,
    Mobile(String),
}

impl RefreshRequest {
    fn kind(&self) -> RefreshKind {
        match self {
            RefreshRequest::Session => RefreshKind::Session,
            RefreshRequest::Mobile(_) => RefreshKind::Mobile,
        }
    }
}

struct InFlight {
    generation: u64,
    handle: RefreshHandle,
}

#[derive(Default)]
struct Slots {
    session: Option<InFlight>,
    mobile: Option<InFlight>,
}

impl Slots {
    fn get_mut(&mut self, kind: RefreshKind) -> &mut Option<InFlight> {
        match kind {
            RefreshKind::Session => &mut self.session,
            RefreshKind::Mobile => &mut self.mobile,
        }
    }
}

struct Inner {
    backend: Arc<dyn SessionBackend>,
    store: Arc<dyn SessionStore>,
    slots: Mutex<Slots>,
    generation: AtomicU64,
}

impl Inner {
    fn lock_slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_refresh(&self, request: RefreshRequest) -> bool {
        let kind = request.kind();
        let result = match &request {
            RefreshRequest::Session => self.backend.refresh().await,
            RefreshRequest::Mobile(token) => self.backend.verify_mobile_token(token).await,
        };

        match result {
            Ok(payload) => {
                match payload.user {
                    Some(user) => {
                        info!(?kind, user_id = user.id, "session refreshed");
                        self.store.set(user);
                    }
                    None => debug!(?kind, "session refreshed without user payload"),
                }
                true
            }
            Err(err) => {
                warn!(?kind, error = %err, "session refresh failed, clearing session");
                self.store.clear();
                false
            }
        }
    }
}

/// Clears the in-flight slot when the refresh task ends, including on panic.
struct SlotGuard {
    inner: Arc<Inner>,
    kind: RefreshKind,
    generation: u64,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let mut slots = self.inner.lock_slots();
        let slot = slots.get_mut(self.kind);
        if slot
            .as_ref()
            .is_some_and(|in_flight| in_flight.generation == self.generation)
        {
            *slot = None;
        }
    }
}

/// Owns the session lifecycle: login, logout and deduplicated refresh.
///
/// At most one cookie refresh and one mobile-token refresh are in flight at a
/// time; callers arriving while one is pending share its outcome.
#[derive(Clone)]
pub struct SessionCoordinator {
    inner: Arc<Inner>,
}

impl SessionCoordinator {
    pub fn new(backend: Arc<dyn SessionBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                store,
                slots: Mutex::new(Slots::default()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.store.get()
    }

    /// Re-validate the ambient session.
    ///
    /// Joins the pending refresh if there is one. The operation is spawned on
    /// the current Tokio runtime and runs to completion even if every handle
    /// is dropped.
    pub fn refresh(&self) -> RefreshHandle {
        self.start_or_join(RefreshRequest::Session)
    }

    /// Establish the session from a mobile one-time token.
    ///
    /// While a mobile refresh is pending, later calls join it whatever token
    /// they carry.
    pub fn refresh_mobile(&self, token: impl Into<String>) -> RefreshHandle {
        self.start_or_join(RefreshRequest::Mobile(token.into()))
    }

    fn start_or_join(&self, request: RefreshRequest) -> RefreshHandle {
        let kind = request.kind();
        let Ok(runtime) = Handle::try_current() else {
            warn!(?kind, "refresh requested outside a Tokio runtime");
            return RefreshHandle::settled(false);
        };

        let (tx, rx) = oneshot::channel::<bool>();
        let (generation, handle) = {
            let mut slots = self.inner.lock_slots();
            let slot = slots.get_mut(kind);

            if let Some(in_flight) = slot.as_ref() {
                debug!(?kind, generation = in_flight.generation, "joining in-flight refresh");
                return in_flight.handle.clone();
            }

            let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let handle = RefreshHandle {
                inner: rx.map(|outcome| outcome.unwrap_or(false)).boxed().shared(),
            };
            *slot = Some(InFlight {
                generation,
                handle: handle.clone(),
            });
            (generation, handle)
        };

        // Spawned with the slot lock released: a future dropped by a runtime
        // that is shutting down must be able to clear its own slot.
        let guard = SlotGuard {
            inner: Arc::clone(&self.inner),
            kind,
            generation,
        };
        let inner = Arc::clone(&self.inner);
        runtime.spawn(async move {
            let refreshed = inner.run_refresh(request).await;
            // Release the slot before waking waiters so a follow-up call
            // starts a new refresh.
            drop(guard);
            let _ = tx.send(refreshed);
        });
        debug!(?kind, generation, "refresh started");
        handle
    }

    /// Log in with username/password and store the returned user.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let result = self.inner.backend.login(&request).await.and_then(|payload| {
            payload.user.ok_or_else(|| {
                ApiError::InvalidResponse("login response is missing user".to_string())
            })
        });

        match result {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "logged in");
                self.inner.store.set(user.clone());
                Ok(user)
            }
            Err(err) => {
                warn!(username, error = %err, "login failed");
                self.inner.store.clear();
                Err(err)
            }
        }
    }

    /// Log out. Local session state is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self.inner.backend.logout().await;
        self.inner.store.clear();
        match &result {
            Ok(()) => info!("logged out"),
            Err(err) => warn!(error = %err, "logout request failed, session cleared locally"),
        }
        result
    }

    /// Run `op`, and if it fails as unauthenticated, refresh once and retry.
    pub async fn with_reauth<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match op().await {
            Err(err) if err.is_auth_error() => {
                debug!(error = %err, "request unauthorized, attempting silent refresh");
                if self.refresh().await {
                    op().await
                } else {
                    Err(err)
                }
            }
            other => other,
        }
    }
}

impl fmt::Debug for SessionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.inner.lock_slots();
        f.debug_struct("SessionCoordinator")
            .field("session_refresh_pending", &slots.session.is_some())
            .field("mobile_refresh_pending", &slots.mobile.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::auth::{MemorySessionStore, MockOutcome, MockSessionBackend};

    fn user(id: i64) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: None,
            role: None,
        }
    }

    fn setup(
        outcomes: Vec<MockOutcome>,
    ) -> (SessionCoordinator, Arc<MockSessionBackend>, MemorySessionStore) {
        let backend =
            Arc::new(MockSessionBackend::new(outcomes).with_delay(Duration::from_millis(20)));
        let store = MemorySessionStore::new();
        let coordinator = SessionCoordinator::new(backend.clone(), Arc::new(store.clone()));
        (coordinator, backend, store)
    }

    #[test]
    fn test_refresh_outside_runtime_settles_false() {
        let (coordinator, backend, store) = setup(vec![MockOutcome::User(user(4))]);

        let handle = coordinator.refresh();
        assert_eq!(handle.now_or_never(), Some(false));
        assert_eq!(backend.refresh_calls(), 0);
        assert_eq!(store.get(), None);

        // The slot was never taken, so a later refresh inside a runtime runs.
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        assert!(runtime.block_on(coordinator.refresh()));
        assert_eq!(backend.refresh_calls(), 1);
        assert_eq!(store.get(), Some(user(4)));
    }

    #[tokio::test]
    async fn test_concurrent_refresh_is_deduplicated() {
        let (coordinator, backend, store) = setup(vec![
            MockOutcome::User(user(1)),
            MockOutcome::User(user(2)),
        ]);

        let first = coordinator.refresh();
        let second = coordinator.refresh();
        assert!(first.same_operation(&second));

        let (a, b) = tokio::join!(first, second);
        assert!(a && b);
        assert_eq!(backend.refresh_calls(), 1);
        assert_eq!(store.get(), Some(user(1)));

        let third = coordinator.refresh();
        assert!(third.await);
        assert_eq!(backend.refresh_calls(), 2);
        assert_eq!(store.get(), Some(user(2)));
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session_then_recovers() {
        let (coordinator, backend, store) = setup(vec![
            MockOutcome::Fail("expired".to_string()),
            MockOutcome::User(user(3)),
        ]);
        store.set(user(1));

        assert!(!coordinator.refresh().await);
        assert_eq!(store.get(), None);

        assert!(coordinator.refresh().await);
        assert_eq!(store.get(), Some(user(3)));
        assert_eq!(backend.refresh_calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_without_user_keeps_store() {
        let (coordinator, _backend, store) = setup(vec![MockOutcome::NoUser]);
        store.set(user(4));

        assert!(coordinator.refresh().await);
        assert_eq!(store.get(), Some(user(4)));
    }

    #[tokio::test]
    async fn test_mobile_refresh_has_own_slot() {
        let (coordinator, backend, store) = setup(vec![
            MockOutcome::User(user(5)),
            MockOutcome::User(user(6)),
        ]);

        let mobile_a = coordinator.refresh_mobile("one-time-a");
        let mobile_b = coordinator.refresh_mobile("one-time-b");
        let cookie = coordinator.refresh();
        assert!(mobile_a.same_operation(&mobile_b));
        assert!(!mobile_a.same_operation(&cookie));

        let (a, b, c) = tokio::join!(mobile_a, mobile_b, cookie);
        assert!(a && b && c);
        assert_eq!(backend.mobile_calls(), 1);
        assert_eq!(backend.refresh_calls(), 1);
        assert!(store.get().is_some());
    }

    #[tokio::test]
    async fn test_dropped_handle_still_completes_and_releases_slot() {
        let (coordinator, backend, store) = setup(vec![
            MockOutcome::User(user(7)),
            MockOutcome::User(user(8)),
        ]);

        drop(coordinator.refresh());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.get(), Some(user(7)));

        assert!(coordinator.refresh().await);
        assert_eq!(backend.refresh_calls(), 2);
        assert_eq!(store.get(), Some(user(8)));
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let (coordinator, backend, store) = setup(vec![
            MockOutcome::User(user(9)),
            MockOutcome::Fail("backend down".to_string()),
        ]);

        let logged_in = coordinator.login("user9", "secret").await.expect("login");
        assert_eq!(logged_in, user(9));
        assert_eq!(coordinator.current_user(), Some(user(9)));

        assert!(coordinator.logout().await.is_err());
        assert_eq!(store.get(), None);
        assert_eq!(backend.login_calls(), 1);
        assert_eq!(backend.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_login_without_user_is_invalid() {
        let (coordinator, _backend, store) = setup(vec![MockOutcome::NoUser]);
        let err = coordinator.login("a", "b").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_with_reauth_retries_once_after_refresh() {
        let (coordinator, backend, _store) = setup(vec![MockOutcome::User(user(1))]);
        let counter = AtomicU64::new(0);
        let attempts = &counter;

        let result = coordinator
            .with_reauth(move || async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ApiError::Unauthorized {
                        message: "expired".to_string(),
                    })
                } else {
                    Ok("tasks")
                }
            })
            .await;

        assert_eq!(result.expect("retried"), "tasks");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(backend.refresh_calls(), 1);
    }

    #[tokio::test]
    async fn test_with_reauth_gives_up_when_refresh_fails() {
        let (coordinator, backend, _store) =
            setup(vec![MockOutcome::Fail("expired".to_string())]);
        let counter = AtomicU64::new(0);
        let attempts = &counter;

        let result: Result<()> = coordinator
            .with_reauth(move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Unauthorized {
                    message: "expired".to_string(),
                })
            })
            .await;

        assert!(result.unwrap_err().is_auth_error());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(backend.refresh_calls(), 1);
    }

    #[tokio::test]
    async fn test_with_reauth_passes_other_errors_through() {
        let (coordinator, backend, _store) = setup(vec![]);

        let result: Result<()> = coordinator
            .with_reauth(|| async { Err(ApiError::Validation("bad".to_string())) })
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(backend.refresh_calls(), 0);
    }
}
