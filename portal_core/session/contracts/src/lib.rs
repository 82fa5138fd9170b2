use chrono::{DateTime, Utc};
use portal_models::{auth::AccessToken, session::SessionSnapshot, user::Identity};

pub mod guard;

/// Persisted storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth-token";
/// Persisted storage key for the serialized identity.
pub const USER_KEY: &str = "auth-user";
/// Persisted storage key for the token expiry instant (RFC 3339 string).
pub const EXPIRATION_KEY: &str = "auth-token-expiration";

/// Callback receiving every session snapshot change.
pub type SessionObserver = Box<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// Handle to a registered observer; disposing it stops further delivery.
///
/// Disposal is explicit: dropping the handle without calling
/// [`SessionSubscription::unsubscribe`] leaves the observer registered for
/// the lifetime of the store.
pub trait SessionSubscription: Send {
    fn unsubscribe(self: Box<Self>);
}

/// The single authoritative holder of the current session.
///
/// All state mutation goes through [`Self::restore`], [`Self::login`] and
/// [`Self::logout`]; every mutation atomically updates persistence, the
/// in-memory snapshot, and all registered observers, in that order.
/// Observers are invoked synchronously and must not call back into the
/// store.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SessionService: Send + Sync + 'static {
    /// Rehydrates the session from persisted storage; called once at
    /// process start.
    ///
    /// A cold start, a partially written session, an unparseable entry, or
    /// an already expired credential all yield an empty session and erase
    /// whatever was persisted. None of these are errors to the caller; they
    /// are reported on the log channel only.
    fn restore(&self);

    /// Establishes a new session: persists the credential and identity,
    /// replaces the in-memory snapshot, and notifies all observers.
    ///
    /// `expires_at` is accepted as given, even if it already lies in the
    /// past; expiry is only detected by the next [`Self::is_authenticated`]
    /// call. A failure to persist is logged, not surfaced, and leaves the
    /// in-process session fully usable.
    fn login(&self, cmd: SessionLoginCommand);

    /// Ends the session: erases persisted state, clears the snapshot, and
    /// notifies all observers.
    ///
    /// Idempotent; a repeated call only produces a redundant broadcast of
    /// the empty snapshot.
    fn logout(&self);

    /// The current bearer token, for attaching authorization to outgoing
    /// requests.
    fn token(&self) -> Option<AccessToken>;

    /// Whether a credential is present and not yet expired.
    ///
    /// Detecting an expired credential triggers [`Self::logout`] before
    /// returning `false` (fail-closed, self-healing).
    fn is_authenticated(&self) -> bool;

    /// The current externally observable state.
    fn snapshot(&self) -> SessionSnapshot;

    /// Registers an observer for snapshot changes.
    ///
    /// The observer immediately receives the current snapshot
    /// (replay-latest), then every subsequent change in mutation order. A
    /// panicking observer is isolated; delivery to the others proceeds.
    fn subscribe(&self, observer: SessionObserver) -> Box<dyn SessionSubscription>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLoginCommand {
    pub identity: Identity,
    pub token: AccessToken,
    pub expires_at: DateTime<Utc>,
}

#[cfg(feature = "mock")]
pub struct NoopSubscription;

#[cfg(feature = "mock")]
impl SessionSubscription for NoopSubscription {
    fn unsubscribe(self: Box<Self>) {}
}

#[cfg(feature = "mock")]
impl MockSessionService {
    pub fn with_is_authenticated(mut self, authenticated: bool) -> Self {
        self.expect_is_authenticated().return_const(authenticated);
        self
    }

    pub fn with_token(mut self, token: Option<AccessToken>) -> Self {
        self.expect_token().return_const(token);
        self
    }

    pub fn with_snapshot(mut self, snapshot: SessionSnapshot) -> Self {
        self.expect_snapshot().return_const(snapshot);
        self
    }

    pub fn with_login(mut self, cmd: SessionLoginCommand) -> Self {
        self.expect_login()
            .once()
            .with(mockall::predicate::eq(cmd))
            .return_const(());
        self
    }

    pub fn with_logout(mut self) -> Self {
        self.expect_logout().once().return_const(());
        self
    }
}
