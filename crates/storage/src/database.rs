use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::error::{Result, StorageError};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Scoped access to the store for one unit of work. While any guard is alive
/// the store file cannot be exported or replaced.
pub type PoolGuard<'a> = RwLockReadGuard<'a, SqlitePool>;

/// Handle to the SQLite store file.
///
/// Regular operations share the pool through [`Database::acquire`]. Exporting
/// and replacing the whole file take the lock exclusively, so they never
/// interleave with in-flight reads or writes.
#[derive(Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

struct Inner {
    pool: RwLock<SqlitePool>,
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Opens (creating if needed) the store at `path` and applies migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = connect(&options).await?;
        tracing::debug!(path = %path.display(), "Store opened");

        Ok(Self {
            inner: Arc::new(Inner {
                pool: RwLock::new(pool),
                path,
                options,
            }),
        })
    }

    /// Acquires the pool for one unit of work.
    pub async fn acquire(&self) -> PoolGuard<'_> {
        self.inner.pool.read().await
    }

    /// Returns the complete store file as bytes.
    pub async fn export_bytes(&self) -> Result<Vec<u8>> {
        let pool = self.inner.pool.write().await;

        // Fold the write-ahead log into the main file so the copy is complete.
        let (busy, _, _): (i64, i64, i64) = sqlx::query_as("PRAGMA wal_checkpoint(TRUNCATE)")
            .fetch_one(&*pool)
            .await?;
        if busy != 0 {
            tracing::warn!("Checkpoint blocked by another reader, export aborted");
            return Err(StorageError::Busy);
        }
        let bytes = tokio::fs::read(&self.inner.path).await?;

        tracing::info!(bytes = bytes.len(), "Store exported");
        Ok(bytes)
    }

    /// Replaces the store file with `bytes` and reopens it.
    ///
    /// If the file swap fails or the new file cannot be opened as a store,
    /// the previous file is put back, the handle is reopened on it and the
    /// error is returned.
    pub async fn replace_with_bytes(&self, bytes: &[u8]) -> Result<()> {
        let mut pool = self.inner.pool.write().await;
        let path = &self.inner.path;
        let staged = sibling(path, "incoming");
        let previous = sibling(path, "previous");

        if let Err(e) = stage(&staged, bytes).await {
            remove_if_exists(&staged).await?;
            return Err(e.into());
        }

        pool.close().await;

        let mut moved_aside = false;
        let mut swapped_in = false;
        let swapped = async {
            remove_sidecars(path).await?;
            if tokio::fs::try_exists(path).await? {
                tokio::fs::rename(path, &previous).await?;
                moved_aside = true;
            }
            tokio::fs::rename(&staged, path).await?;
            swapped_in = true;
            Ok::<(), StorageError>(())
        }
        .await;

        let reopened = match swapped {
            Ok(()) => connect(&self.inner.options).await,
            Err(e) => Err(e),
        };

        match reopened {
            Ok(reopened) => {
                *pool = reopened;
                remove_if_exists(&previous).await?;
                tracing::info!(bytes = bytes.len(), "Store replaced");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Store replacement failed, restoring previous file");
                remove_if_exists(&staged).await?;
                if swapped_in {
                    remove_sidecars(path).await?;
                    remove_if_exists(path).await?;
                }
                if moved_aside {
                    tokio::fs::rename(&previous, path).await?;
                }
                *pool = connect(&self.inner.options).await?;
                Err(e)
            }
        }
    }
}

async fn stage(staged: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(staged).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn connect(options: &SqliteConnectOptions) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options.clone())
        .await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        pool.close().await;
        return Err(e.into());
    }

    Ok(pool)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

async fn remove_sidecars(path: &Path) -> std::io::Result<()> {
    for suffix in ["-wal", "-shm"] {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        remove_if_exists(Path::new(&name)).await?;
    }
    Ok(())
}

async fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
