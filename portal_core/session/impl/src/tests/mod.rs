use std::sync::{Arc, Mutex};

use portal_auth_contracts::MockTokenGateService;
use portal_core_session_contracts::SessionObserver;
use portal_models::session::SessionSnapshot;
use portal_storage_contracts::MockStorageService;

use crate::SessionServiceImpl;

mod guard;

type Sut = SessionServiceImpl<MockTokenGateService, MockStorageService>;

/// An observer that records every snapshot it is handed.
fn recorder() -> (SessionObserver, Arc<Mutex<Vec<SessionSnapshot>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer: SessionObserver =
        Box::new(move |snapshot| sink.lock().unwrap().push(snapshot.clone()));
    (observer, seen)
}
