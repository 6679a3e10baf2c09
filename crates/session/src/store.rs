//! SessionStore - the bearer token and who is watching it

use shared::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info};

/// Key under which the token is persisted
pub const TOKEN_KEY: &str = "erp-auth-token";

/// Whether a credential is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Persistent home of the session token
pub trait TokenStorage: Send + Sync + fmt::Debug {
    /// Stored token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Store `token`, replacing any previous value
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token
    fn clear(&self) -> Result<()>;
}

// ============== FileTokenStorage ==============

/// Small JSON key/value file holding the token under `erp-auth-token`.
///
/// Other keys in the file are left untouched.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(TOKEN_KEY))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// ============== MemoryTokenStorage ==============

/// In-memory storage; clones share the same slot, which lets tests simulate
/// a reload by restoring a second store from a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> T {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut slot)
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.with_slot(|slot| slot.clone()))
    }

    fn save(&self, token: &str) -> Result<()> {
        self.with_slot(|slot| *slot = Some(token.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.with_slot(|slot| *slot = None);
        Ok(())
    }
}

// ============== SessionStore ==============

/// Single owner of the session token.
///
/// Reads are synchronous; every change is persisted and then published to
/// subscribers. No local expiry check is made; the server decides.
#[derive(Debug)]
pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    token: Option<String>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Rebuild the session a restart implies from whatever `storage` holds
    pub fn restore(storage: impl TokenStorage + 'static) -> Result<Self> {
        let token = storage.load()?.filter(|t| !t.trim().is_empty());
        let state = state_for(&token);
        debug!(%state, "session restored");
        let (state_tx, _) = watch::channel(state);
        Ok(Self {
            storage: Box::new(storage),
            token,
            state_tx,
        })
    }

    /// Store a new credential; a blank token is treated as a logout
    pub fn login(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return self.logout();
        }
        self.storage.save(&token)?;
        self.token = Some(token);
        info!("session authenticated");
        self.publish();
        Ok(())
    }

    /// Drop the credential and its persisted copy
    pub fn logout(&mut self) -> Result<()> {
        self.storage.clear()?;
        let was_authenticated = self.token.take().is_some();
        if was_authenticated {
            info!("session cleared");
        }
        self.publish();
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn state(&self) -> SessionState {
        state_for(&self.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Receiver that observes every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state());
    }
}

fn state_for(token: &Option<String>) -> SessionState {
    match token {
        Some(_) => SessionState::Authenticated,
        None => SessionState::Anonymous,
    }
}
