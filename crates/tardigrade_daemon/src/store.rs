//! Transaction store access.
//!
//! The walk reads the whole log once per request through an explicit session
//! handle. A session is acquired from the store, used for a single `list`, and
//! released when dropped; there is no process-wide connection state.

use std::future::Future;
use std::path::{Path, PathBuf};

use tardigrade_core::TransactionRecord;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open transaction store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read transaction store: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed transaction records: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of transaction records.
pub trait TransactionStore: Send + Sync + 'static {
    type Session: StoreSession;

    /// Acquire a read session. Dropping the session releases it.
    fn open_session(&self) -> impl Future<Output = Result<Self::Session, StoreError>> + Send;
}

/// A scoped read handle on the store.
pub trait StoreSession: Send {
    /// Every record, sorted ascending by block time (undated records first).
    fn list(&mut self) -> impl Future<Output = Result<Vec<TransactionRecord>, StoreError>> + Send;
}

/// Stable sort by block time; `None` orders before any timestamp.
pub fn sort_by_block_time(records: &mut [TransactionRecord]) {
    records.sort_by_key(|tx| tx.block_time);
}

/// Store backed by a JSON file containing an array of records.
///
/// The file is re-read on every session, so records appended by the indexer
/// show up on the next request.
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

pub struct JsonFileSession {
    file: tokio::fs::File,
    path: PathBuf,
}

impl TransactionStore for JsonFileStore {
    type Session = JsonFileSession;

    async fn open_session(&self) -> Result<JsonFileSession, StoreError> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "Store session opened");
        Ok(JsonFileSession {
            file,
            path: self.path.clone(),
        })
    }
}

impl StoreSession for JsonFileSession {
    async fn list(&mut self) -> Result<Vec<TransactionRecord>, StoreError> {
        use tokio::io::AsyncReadExt;

        let mut raw = Vec::new();
        self.file.read_to_end(&mut raw).await?;
        let mut records: Vec<TransactionRecord> = serde_json::from_slice(&raw)?;
        sort_by_block_time(&mut records);
        Ok(records)
    }
}

impl Drop for JsonFileSession {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "Store session released");
    }
}


#[cfg(test)]
pub(crate) mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use tardigrade_core::ActivityType;

    pub(crate) fn record(signature: &str, block_time: Option<i64>) -> TransactionRecord {
        TransactionRecord {
            signature: signature.to_string(),
            from: "from".to_string(),
            to: "to".to_string(),
            amount: "10".to_string(),
            slot: 1,
            block_time,
            activity_type: ActivityType::AggSwap,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tardigrade-{}-{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn memory_store_sorts_and_releases() {
        let store = MemoryStore::new(vec![
            record("late", Some(30)),
            record("undated", None),
            record("early", Some(10)),
        ]);

        {
            let mut session = store.open_session().await.unwrap();
            assert_eq!(store.open_sessions(), 1);
            let sigs: Vec<_> = session
                .list()
                .await
                .unwrap()
                .into_iter()
                .map(|tx| tx.signature)
                .collect();
            assert_eq!(sigs, vec!["undated", "early", "late"]);
        }

        assert_eq!(store.open_sessions(), 0);
    }

    #[tokio::test]
    async fn json_store_reads_and_sorts_file() {
        let path = temp_file("read");
        let records = vec![record("b", Some(2)), record("a", Some(1))];
        std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();

        let store = JsonFileStore::new(&path);
        let mut session = store.open_session().await.unwrap();
        let listed = session.list().await.unwrap();
        drop(session);
        let _ = std::fs::remove_file(&path);

        assert_eq!(listed[0].signature, "a");
        assert_eq!(listed[1].signature, "b");
    }

    #[tokio::test]
    async fn missing_file_fails_to_open() {
        let store = JsonFileStore::new(temp_file("missing-never-created"));
        assert!(matches!(
            store.open_session().await,
            Err(StoreError::Open { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_file_fails_to_decode() {
        let path = temp_file("malformed");
        std::fs::write(&path, b"{\"not\": \"an array\"}").unwrap();

        let store = JsonFileStore::new(&path);
        let mut session = store.open_session().await.unwrap();
        let result = session.list().await;
        drop(session);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(StoreError::Decode(_))));
    }
}
