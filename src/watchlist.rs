use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Persistence for the watchlist, the one piece of client-owned state.
pub trait WatchlistStore: Send + Sync {
    fn load(&self) -> io::Result<BTreeSet<String>>;
    fn save(&self, symbols: &BTreeSet<String>) -> io::Result<()>;
}

/// Stores the set as a JSON array of symbols in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WatchlistStore for JsonFileStore {
    fn load(&self) -> io::Result<BTreeSet<String>> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let symbols: Vec<String> = serde_json::from_str(&content)?;
        Ok(symbols.into_iter().collect())
    }

    fn save(&self, symbols: &BTreeSet<String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&symbols.iter().collect::<Vec<_>>())?;
        fs::write(&self.path, json)
    }
}

/// In-process store; clones share the same contents, which lets tests
/// simulate a reload by building a second `Watchlist` on a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<BTreeSet<String>>>,
}

impl WatchlistStore for MemoryStore {
    fn load(&self) -> io::Result<BTreeSet<String>> {
        self.inner
            .lock()
            .map(|set| set.clone())
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "watchlist store poisoned"))
    }

    fn save(&self, symbols: &BTreeSet<String>) -> io::Result<()> {
        let mut set = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "watchlist store poisoned"))?;
        *set = symbols.clone();
        Ok(())
    }
}

/// In-memory mirror of the persisted watchlist. Every toggle writes through
/// synchronously; a failed write is logged and the mirror stays authoritative.
pub struct Watchlist {
    symbols: BTreeSet<String>,
    store: Box<dyn WatchlistStore>,
}

impl Watchlist {
    pub fn load(store: Box<dyn WatchlistStore>) -> Self {
        let symbols = match store.load() {
            Ok(symbols) => symbols,
            Err(e) => {
                warn!("Failed to load watchlist, starting empty: {}", e);
                BTreeSet::new()
            }
        };
        info!("Watchlist loaded ({} symbols)", symbols.len());
        Self { symbols, store }
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.symbols.contains(ticker)
    }

    pub fn symbols(&self) -> &BTreeSet<String> {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Adds or removes `ticker`; returns whether it is now watched.
    pub fn toggle(&mut self, ticker: &str) -> bool {
        let watched = if self.symbols.remove(ticker) {
            false
        } else {
            self.symbols.insert(ticker.to_string());
            true
        };
        if let Err(e) = self.store.save(&self.symbols) {
            warn!("Failed to persist watchlist: {}", e);
        }
        watched
    }
}

impl std::fmt::Debug for Watchlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchlist")
            .field("symbols", &self.symbols)
            .finish()
    }
}
