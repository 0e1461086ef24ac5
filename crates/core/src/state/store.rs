use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use log::{debug, error, info, warn};
use tokio::sync::watch;

use super::actions::Action;
use super::app_state::AppState;
use super::reducer::reduce;
use super::storage_traits::StateStorage;
use crate::constants::STORAGE_KEY;

/// Owns the aggregate document.
///
/// `dispatch` is the single writer. Readers take immutable snapshots or
/// subscribe to every new one. Once [`Store::initialize`] has loaded the
/// saved document, each dispatch persists the whole document; storage
/// failures are logged and never fail the dispatch.
pub struct Store {
    state: watch::Sender<Arc<AppState>>,
    storage: Arc<dyn StateStorage>,
    initialized: AtomicBool,
    /// Serializes storage writes so the last one always carries the latest snapshot.
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        let (state, _) = watch::channel(Arc::new(AppState::default()));
        Self {
            state,
            storage,
            initialized: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the persisted document (if any) and starts persisting.
    ///
    /// A missing or malformed document leaves the defaults in place, and the
    /// resulting document is written back once. If storage cannot be read at
    /// all, nothing is written and persistence stays off; calling again
    /// retries the read. Calls after a successful load are no-ops.
    pub fn initialize(&self) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        match self.storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => match AppState::from_json(&raw) {
                Ok(document) => {
                    info!("Loaded saved document ({} bytes)", raw.len());
                    self.dispatch(Action::LoadData(Box::new(document)));
                }
                Err(e) => warn!("Saved document is malformed, starting fresh: {}", e),
            },
            Ok(None) => info!("No saved document, starting fresh"),
            Err(e) => {
                error!("Failed to read saved document, persistence disabled: {}", e);
                return;
            }
        }

        self.initialized.store(true, Ordering::Release);
        self.persist_latest();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Applies `action` and publishes the resulting snapshot.
    pub fn dispatch(&self, action: Action) {
        let action_type = action.action_type();
        let now = Utc::now();
        let persist = self.initialized.load(Ordering::Acquire);

        self.state.send_modify(|current| {
            *current = Arc::new(reduce(current, action, now));
        });
        debug!("Dispatched {}", action_type);

        if persist {
            self.persist_latest();
        }
    }

    /// The current document.
    pub fn snapshot(&self) -> Arc<AppState> {
        self.state.borrow().clone()
    }

    /// Receives every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state.subscribe()
    }

    /// Erases the durable document and returns to the defaults.
    pub fn reset(&self) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.storage.remove(STORAGE_KEY) {
            error!("Failed to erase saved document: {}", e);
        }
        self.state.send_replace(Arc::new(AppState::default()));
        warn!("Store reset to defaults");
    }

    /// Writes the current snapshot. Never called with the channel locked.
    fn persist_latest(&self) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let state = self.snapshot();
        let raw = match state.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to serialize document: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY, &raw) {
            error!("Failed to persist document: {}", e);
        }
    }
}
