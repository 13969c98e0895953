//! Session controller.
//!
//! Holds the current member and derived flags for UI surfaces. State moves
//! `Unknown -> Hydrating -> {Authenticated, Anonymous}`; readers observe it
//! through a watch channel and never mutate it directly.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use cjk_core::errors::AuthError;
use cjk_core::models::Member;
use cjk_observability::events;
use tokio::sync::watch;

use crate::client::AuthClient;
use crate::clock::{Clock, SystemClock};
use crate::request::RequestInit;
use crate::store::TokenStore;
use crate::transport::HttpTransport;

/// Lifecycle of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Not hydrated yet.
    Unknown,
    Hydrating,
    Authenticated(Member),
    Anonymous,
}

impl SessionState {
    /// Whether hydration has settled.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Anonymous)
    }
}

/// Read-only view of the session as UI surfaces consume it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub member: Option<Member>,
    pub is_authenticated: bool,
    pub is_official_member: bool,
    pub is_loading: bool,
}

impl From<&SessionState> for Session {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Authenticated(member) => Self {
                is_authenticated: true,
                is_official_member: member.is_official(),
                member: Some(member.clone()),
                is_loading: false,
            },
            SessionState::Hydrating => Self {
                is_loading: true,
                ..Self::default()
            },
            SessionState::Unknown | SessionState::Anonymous => Self::default(),
        }
    }
}

/// Owns the session state and the client it hydrates through.
pub struct SessionController<T, S, C = SystemClock> {
    client: AuthClient<T, S, C>,
    state: watch::Sender<SessionState>,
    /// Bumped by every load and logout; a hydration publishes only if no
    /// later load or logout started while it was in flight.
    generation: AtomicU64,
    mounted: AtomicBool,
}

impl<T, S, C> SessionController<T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    pub fn new(client: AuthClient<T, S, C>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            client,
            state,
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &AuthClient<T, S, C> {
        &self.client
    }

    /// Receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> Session {
        Session::from(&*self.state.borrow())
    }

    /// Hydrate once. Later calls return the current snapshot without I/O.
    pub async fn mount(&self) -> Session {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return self.snapshot();
        }
        self.load_session().await
    }

    /// Rebuild the session from the stored credentials.
    ///
    /// Always settles in `Authenticated` or `Anonymous`. Failures are absorbed
    /// here; a 401 on the profile lookup also drops the stored pair.
    pub async fn load_session(&self) -> Session {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(SessionState::Hydrating);

        let (settled, reason) = self.hydrate().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding superseded hydration");
            return self.snapshot();
        }

        match &settled {
            SessionState::Authenticated(member) => {
                events::session_hydrated(member.id, member.is_official())
            }
            _ => events::session_anonymous(reason),
        }
        self.state.send_replace(settled);
        self.snapshot()
    }

    /// Re-run hydration.
    pub async fn refresh(&self) -> Session {
        self.load_session().await
    }

    /// Drop the stored credentials and go anonymous. No network traffic.
    pub fn logout(&self) {
        self.client.drop_credentials();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SessionState::Anonymous);
        events::logged_out();
    }

    /// Log in, then hydrate the session from the new pair.
    pub async fn login_and_load(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.client.login(username, password).await?;
        self.mounted.store(true, Ordering::SeqCst);
        Ok(self.load_session().await)
    }

    async fn hydrate(&self) -> (SessionState, &'static str) {
        if self.client.ensure_valid_access_token().await.is_none() {
            return (SessionState::Anonymous, "no usable credentials");
        }

        let me_path = self.client.auth_config().me_path.clone();
        match self.client.request::<Member>(&me_path, RequestInit::get()).await {
            Ok(member) => (SessionState::Authenticated(member), "authenticated"),
            Err(e) if e.is_unauthorized() => {
                self.client.drop_credentials();
                (SessionState::Anonymous, "profile lookup unauthorized")
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile lookup failed");
                (SessionState::Anonymous, "profile lookup failed")
            }
        }
    }
}
