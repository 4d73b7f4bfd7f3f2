use crate::errors::PanelError;
use crate::geometry::{clamp, Position, DEFAULT_POSITION};
use egui::Vec2;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

pub const STORAGE_PREFIX: &str = "float-panel:";

/// Key under which a panel's position is persisted.
pub fn storage_key(persist_key: &str) -> String {
    format!("{STORAGE_PREFIX}{persist_key}")
}

/// External string key-value storage used to remember panel positions.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PanelError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PanelError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PanelError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PanelError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Owns the current panel position. Every write goes through [`clamp`].
pub struct PositionStore {
    position: Position,
    persist_key: Option<String>,
    storage: Option<Rc<dyn KeyValueStore>>,
}

impl PositionStore {
    /// Restore the persisted position for `persist_key`, or start at [`DEFAULT_POSITION`].
    ///
    /// Missing storage, a missing record, a failed read and malformed data all
    /// yield the default. Only the last two are logged.
    pub fn initialize(
        persist_key: Option<String>,
        storage: Option<Rc<dyn KeyValueStore>>,
    ) -> Self {
        let position = match (&persist_key, &storage) {
            (Some(key), Some(storage)) => match load(storage.as_ref(), key) {
                Ok(Some(position)) => position,
                Ok(None) => DEFAULT_POSITION,
                Err(err) => {
                    warn!("discard persisted position for {key}: {err}");
                    DEFAULT_POSITION
                }
            },
            _ => DEFAULT_POSITION,
        };
        debug!("panel position initialized to {position:?}");

        Self {
            position,
            persist_key,
            storage,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Clamp `candidate` against the given measurements and make it current.
    pub fn set(&mut self, candidate: Position, viewport: Vec2, panel: Option<Vec2>) -> Position {
        self.position = clamp(candidate.x, candidate.y, viewport, panel);
        self.position
    }

    /// Best-effort write of the current position. Failures are logged and dropped.
    pub fn persist(&self) {
        let (Some(key), Some(storage)) = (&self.persist_key, &self.storage) else {
            return;
        };
        match save(storage.as_ref(), key, self.position) {
            Ok(()) => debug!("persisted panel position {:?} under {key}", self.position),
            Err(err) => warn!("failed to persist panel position under {key}: {err}"),
        }
    }
}

fn load(storage: &dyn KeyValueStore, persist_key: &str) -> Result<Option<Position>, PanelError> {
    match storage.get(&storage_key(persist_key))? {
        Some(value) => Ok(Some(serde_json::from_str(&value)?)),
        None => Ok(None),
    }
}

fn save(
    storage: &dyn KeyValueStore,
    persist_key: &str,
    position: Position,
) -> Result<(), PanelError> {
    let value = serde_json::to_string(&position)?;
    storage.set(&storage_key(persist_key), &value)
}
