use crate::types::{SaveUserDataRequest, UserRecord};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence for device balances.
pub trait TokenStore: Send + Sync + 'static {
    fn get(
        &self,
        device_id: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, StoreError>> + Send;

    /// Create or overwrite the record for `request.device_id`.
    fn upsert(
        &self,
        request: &SaveUserDataRequest,
    ) -> impl Future<Output = Result<UserRecord, StoreError>> + Send;
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Every save counts as a win; the balance is replaced, not added to.
pub fn apply_save(
    existing: Option<&UserRecord>,
    request: &SaveUserDataRequest,
    now: u64,
) -> UserRecord {
    UserRecord {
        device_id: request.device_id.clone(),
        hopla_tokens: request.hopla_tokens,
        total_wins: existing.map_or(0, |r| r.total_wins) + 1,
        last_score: request.score.unwrap_or(0),
        last_updated: now,
    }
}

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryStore {
    async fn get(&self, device_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.read().await.get(device_id).cloned())
    }

    async fn upsert(&self, request: &SaveUserDataRequest) -> Result<UserRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = apply_save(records.get(&request.device_id), request, now_millis());
        records.insert(record.device_id.clone(), record.clone());
        Ok(record)
    }
}

/// One JSON document mapping device id to record, rewritten on every save.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, UserRecord>>,
}

impl FileStore {
    /// A missing file starts empty; an unreadable one is an error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(path = %path.display(), devices = records.len(), "file store opened");

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &BTreeMap<String, UserRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl TokenStore for FileStore {
    async fn get(&self, device_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.lock().await.get(device_id).cloned())
    }

    async fn upsert(&self, request: &SaveUserDataRequest) -> Result<UserRecord, StoreError> {
        let mut records = self.records.lock().await;
        let record = apply_save(records.get(&request.device_id), request, now_millis());

        let previous = records.insert(record.device_id.clone(), record.clone());
        if let Err(e) = self.persist(&records).await {
            // keep memory in step with the file
            match previous {
                Some(old) => records.insert(old.device_id.clone(), old),
                None => records.remove(&record.device_id),
            };
            return Err(e);
        }

        tracing::debug!(device_id = %record.device_id, tokens = record.hopla_tokens, "record saved");
        Ok(record)
    }
}

/// Store chosen at startup.
#[derive(Debug)]
pub enum AnyStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl TokenStore for AnyStore {
    async fn get(&self, device_id: &str) -> Result<Option<UserRecord>, StoreError> {
        match self {
            AnyStore::Memory(store) => store.get(device_id).await,
            AnyStore::File(store) => store.get(device_id).await,
        }
    }

    async fn upsert(&self, request: &SaveUserDataRequest) -> Result<UserRecord, StoreError> {
        match self {
            AnyStore::Memory(store) => store.upsert(request).await,
            AnyStore::File(store) => store.upsert(request).await,
        }
    }
}
