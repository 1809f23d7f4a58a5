//! Server-side shared state: gateway state plus manager sessions.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use slipstream_core::AppState;

/// State behind the admin API and the manager console. Sessions are
/// in-memory only and die with the process.
#[derive(Clone)]
pub struct ServerState {
    pub gateway: AppState,
    sessions: Arc<Mutex<HashSet<String>>>,
}

impl ServerState {
    pub fn new(gateway: AppState) -> Self {
        Self { gateway, sessions: Arc::new(Mutex::new(HashSet::new())) }
    }

    /// Mint a browser session after a successful key login.
    pub fn open_session(&self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.lock().insert(token.clone());
        token
    }

    pub fn session_valid(&self, token: &str) -> bool {
        self.sessions.lock().contains(token)
    }
}
