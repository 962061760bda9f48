use crate::persistence::KeyValueStore;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tokio::fs;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

#[derive(Debug)]
enum WriteRequest {
    Replace(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Key-value store kept in a single JSON object on disk. Every write rewrites
/// the whole file.
///
/// Reads are served from memory. Writes are serialized in call order and
/// handed to a background task, so callers never block on the disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    writer: mpsc::UnboundedSender<WriteRequest>,
}

impl JsonFileStore {
    /// Loads the file and starts its writer task. Must be called inside a
    /// tokio runtime.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        let (writer, requests) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(path.clone(), requests));
        Self {
            path,
            entries: Mutex::new(entries),
            writer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits until every write queued so far has reached the disk.
    pub async fn flush(&self) {
        let (done, written) = oneshot::channel();
        if self.writer.send(WriteRequest::Flush(done)).is_ok() {
            let _ = written.await;
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        let payload = serde_json::to_vec_pretty(entries).map_err(io::Error::other)?;
        self.writer
            .send(WriteRequest::Replace(payload))
            .map_err(|_| io::Error::other("data file writer stopped"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.get(key).is_some_and(|current| current == value) {
            return Ok(());
        }
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write(&entries)
    }
}

async fn run_writer(path: PathBuf, mut requests: mpsc::UnboundedReceiver<WriteRequest>) {
    while let Some(request) = requests.recv().await {
        match request {
            WriteRequest::Replace(payload) => {
                if let Err(err) = fs::write(&path, payload).await {
                    error!("failed to write data file {}: {err}", path.display());
                }
            }
            WriteRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = JsonFileStore::open(&path).await;
        store.set("courtside_timer", "42").unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();
        store.flush().await;

        let reopened = JsonFileStore::open(&path).await;
        assert_eq!(reopened.get("courtside_timer").unwrap().as_deref(), Some("42"));
        assert_eq!(reopened.get("other").unwrap(), None);
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).await;
        assert_eq!(store.get("courtside_last_game").unwrap(), None);
        store.flush().await;
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn writes_land_in_call_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = JsonFileStore::open(&path).await;
        for elapsed in 1..=20 {
            store.set("courtside_timer", &elapsed.to_string()).unwrap();
        }
        store.flush().await;

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get("courtside_timer").map(String::as_str), Some("20"));
    }

    #[tokio::test]
    async fn unchanged_value_skips_the_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = JsonFileStore::open(&path).await;
        store.set("courtside_timer", "5").unwrap();
        store.flush().await;
        std::fs::remove_file(&path).unwrap();

        store.set("courtside_timer", "5").unwrap();
        store.flush().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn unparsable_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = JsonFileStore::open(&path).await;
        assert_eq!(store.get("courtside_timer").unwrap(), None);
        store.set("courtside_timer", "1").unwrap();
        store.flush().await;

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get("courtside_timer").map(String::as_str), Some("1"));
    }
}
