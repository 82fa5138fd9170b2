use std::{
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, PoisonError, Weak},
};

use portal_auth_contracts::{parse_expiration, TokenGateService};
use portal_core_session_contracts::{
    SessionLoginCommand, SessionObserver, SessionService, SessionSubscription, EXPIRATION_KEY,
    TOKEN_KEY, USER_KEY,
};
use portal_models::{
    auth::{AccessToken, Credential},
    session::SessionSnapshot,
    user::Identity,
};
use portal_storage_contracts::StorageService;

pub mod guard;

#[cfg(test)]
mod tests;

#[derive(Clone)]
#[cfg_attr(test, derive(Default))]
pub struct SessionServiceImpl<TokenGate, Storage> {
    token_gate: TokenGate,
    storage: Storage,
    state: Arc<Mutex<SessionState>>,
}

#[derive(Default)]
struct SessionState {
    snapshot: SessionSnapshot,
    credential: Option<Credential>,
    observers: Vec<(u64, SessionObserver)>,
    next_observer_id: u64,
}

impl<TokenGate, Storage> SessionServiceImpl<TokenGate, Storage> {
    pub fn new(token_gate: TokenGate, storage: Storage) -> Self {
        Self {
            token_gate,
            storage,
            state: Arc::default(),
        }
    }
}

impl<TokenGate, Storage> SessionServiceImpl<TokenGate, Storage>
where
    TokenGate: TokenGateService,
    Storage: StorageService,
{
    fn load_persisted(&self) -> anyhow::Result<Option<(Identity, Credential)>> {
        let token = self.storage.read::<AccessToken>(TOKEN_KEY)?;
        let identity = self.storage.read::<Identity>(USER_KEY)?;
        let expiration = self.storage.read::<String>(EXPIRATION_KEY)?;

        // A crash between writes can leave a partial session behind; treat
        // anything short of all three entries as absent.
        let (Some(token), Some(identity), Some(expiration)) = (token, identity, expiration) else {
            return Ok(None);
        };

        if self.token_gate.is_expired_raw(&expiration) {
            tracing::debug!("Persisted session has expired");
            return Ok(None);
        }

        let expires_at = parse_expiration(&expiration)?;
        Ok(Some((identity, Credential { token, expires_at })))
    }

    fn persist(&self, identity: &Identity, credential: &Credential) {
        let result = self
            .storage
            .write(TOKEN_KEY, &credential.token)
            .and_then(|()| self.storage.write(USER_KEY, identity))
            .and_then(|()| self.storage.write(EXPIRATION_KEY, &credential.expires_at.to_rfc3339()));
        if let Err(err) = result {
            tracing::error!(%err, "Failed to persist session; it will not survive a restart");
        }
    }

    fn scrub(&self) {
        for key in [TOKEN_KEY, USER_KEY, EXPIRATION_KEY] {
            if let Err(err) = self.storage.remove(key) {
                tracing::error!(%err, key, "Failed to erase persisted session entry");
            }
        }
    }

    /// Replaces the in-memory state and notifies all observers, as one
    /// atomic step with no visible intermediate state.
    fn transition(&self, next: Option<(Identity, Credential)>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        (state.snapshot, state.credential) = match next {
            Some((identity, credential)) => (SessionSnapshot::of(identity), Some(credential)),
            None => (SessionSnapshot::empty(), None),
        };
        for (id, observer) in &state.observers {
            notify(*id, observer, &state.snapshot);
        }
    }
}

fn notify(id: u64, observer: &SessionObserver, snapshot: &SessionSnapshot) {
    if std::panic::catch_unwind(AssertUnwindSafe(|| observer(snapshot))).is_err() {
        tracing::error!(observer = id, "Session observer panicked");
    }
}

impl<TokenGate, Storage> SessionService for SessionServiceImpl<TokenGate, Storage>
where
    TokenGate: TokenGateService,
    Storage: StorageService,
{
    #[tracing::instrument(skip(self))]
    fn restore(&self) {
        match self.load_persisted() {
            Ok(Some((identity, credential))) => self.transition(Some((identity, credential))),
            Ok(None) => {
                self.scrub();
                self.transition(None);
            }
            Err(err) => {
                tracing::warn!(%err, "Discarding unusable persisted session");
                self.scrub();
                self.transition(None);
            }
        }
    }

    #[tracing::instrument(skip(self, cmd))]
    fn login(&self, cmd: SessionLoginCommand) {
        let SessionLoginCommand {
            identity,
            token,
            expires_at,
        } = cmd;
        let credential = Credential { token, expires_at };
        self.persist(&identity, &credential);
        tracing::info!(user = identity.name.as_str(), "Session established");
        self.transition(Some((identity, credential)));
    }

    #[tracing::instrument(skip(self))]
    fn logout(&self) {
        self.scrub();
        self.transition(None);
    }

    fn token(&self) -> Option<AccessToken> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .credential
            .as_ref()
            .map(|credential| credential.token.clone())
    }

    #[tracing::instrument(skip(self))]
    fn is_authenticated(&self) -> bool {
        let expired = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match &state.credential {
                None => return false,
                Some(credential) => self.token_gate.is_expired(credential.expires_at),
            }
        };
        if expired {
            tracing::debug!("Session credential has expired, logging out");
            self.logout();
        }
        !expired
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    fn subscribe(&self, observer: SessionObserver) -> Box<dyn SessionSubscription> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = state.next_observer_id;
        state.next_observer_id += 1;
        // Replay-latest semantics: the observer sees the current snapshot
        // before any future change.
        notify(id, &observer, &state.snapshot);
        state.observers.push((id, observer));
        Box::new(ObserverHandle {
            state: Arc::downgrade(&self.state),
            id,
        })
    }
}

struct ObserverHandle {
    state: Weak<Mutex<SessionState>>,
    id: u64,
}

impl SessionSubscription for ObserverHandle {
    fn unsubscribe(self: Box<Self>) {
        if let Some(state) = self.state.upgrade() {
            state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .observers
                .retain(|(id, _)| *id != self.id);
        }
    }
}
