use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::foundation::error::{CurtainError, CurtainResult};

/// Value written under a gate key once its sequence has completed.
pub const SEEN_VALUE: &str = "true";

/// Session-scoped string storage.
///
/// Methods take `&self`: a store is a process-wide resource shared by every sequencer that
/// consults it, the way a browser's session storage is.
pub trait SessionStore {
    /// Value under `key`, `None` when absent.
    fn get(&self, key: &str) -> CurtainResult<Option<String>>;
    /// Write `value` under `key`.
    fn set(&self, key: &str, value: &str) -> CurtainResult<()>;
}

/// In-memory store that also counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> CurtainResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CurtainResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Store for environments without session storage: every call fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn get(&self, _key: &str) -> CurtainResult<Option<String>> {
        Err(CurtainError::environment("session storage is unavailable"))
    }

    fn set(&self, _key: &str, _value: &str) -> CurtainResult<()> {
        Err(CurtainError::environment("session storage is unavailable"))
    }
}

/// JSON object file standing in for a browsing session.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CurtainResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> CurtainResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> CurtainResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// "Has this sequence already run in this session?"
///
/// Reads fail safe to `false` and writes are best effort; neither ever surfaces an error.
#[derive(Clone)]
pub struct SessionGate {
    store: Rc<dyn SessionStore>,
}

impl SessionGate {
    /// Gate over `store`.
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// True only when the store is readable and holds the seen flag for `key`.
    pub fn has_run(&self, key: &str) -> bool {
        match self.store.get(key) {
            Ok(value) => value.as_deref() == Some(SEEN_VALUE),
            Err(err) => {
                tracing::debug!(key, %err, "session gate unreadable; treating as not run");
                false
            }
        }
    }

    /// Record that `key` completed. Failures are logged and dropped.
    pub fn mark_run(&self, key: &str) {
        if let Err(err) = self.store.set(key, SEEN_VALUE) {
            tracing::warn!(key, %err, "could not persist session flag");
        }
    }
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gate.rs"]
mod tests;
