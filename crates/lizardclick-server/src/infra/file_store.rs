//! JSON document store on local disk.
//!
//! The whole document is rewritten on every mutation: serialize, write to
//! `<path>.tmp`, rename over `<path>`. A reader never sees a half-written
//! document. Operations are serialized by one async mutex, so `increment`
//! is atomic with respect to every other call on this instance. Two
//! processes sharing a file are not supported.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use lizardclick_core::error::{ClickError, Result};
use lizardclick_core::{CounterRecord, CounterStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    records: BTreeMap<String, CounterRecord>,
}

pub struct FileCounterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCounterStore {
    /// Open a store at `path`. The file itself is created on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(ClickError::BadRequest(format!(
                "store.path {} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ClickError::CorruptRecord(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(ClickError::StorageUnavailable(format!(
                "read {} failed: {e}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, doc: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| ClickError::Internal(format!("encode document failed: {e}")))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                ClickError::StorageUnavailable(format!("create {} failed: {e}", dir.display()))
            })?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            ClickError::StorageUnavailable(format!("write {} failed: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            ClickError::StorageUnavailable(format!("rename {} failed: {e}", tmp.display()))
        })?;

        tracing::trace!(path = %self.path.display(), bytes = bytes.len(), "document written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut s = self.path.clone().into_os_string();
        s.push(".tmp");
        PathBuf::from(s)
    }
}

#[async_trait]
impl CounterStore for FileCounterStore {
    async fn find(&self, key: &str) -> Result<Option<CounterRecord>> {
        let _g = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc.records.get(key).cloned())
    }

    async fn create(&self, key: &str, initial: u64) -> Result<CounterRecord> {
        let _g = self.lock.lock().await;
        let mut doc = self.load().await?;
        if doc.records.contains_key(key) {
            return Err(ClickError::AlreadyExists(key.to_string()));
        }
        let record = CounterRecord::with_count(key, initial);
        doc.records.insert(key.to_string(), record.clone());
        self.save(&doc).await?;
        Ok(record)
    }

    async fn increment(&self, key: &str, delta: u64) -> Result<()> {
        let _g = self.lock.lock().await;
        let mut doc = self.load().await?;
        doc.records
            .entry(key.to_string())
            .or_insert_with(|| CounterRecord::new(key))
            .count += delta;
        self.save(&doc).await
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
