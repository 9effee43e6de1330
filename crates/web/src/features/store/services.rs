use storage::{Database, error::Result};

/// Snapshot of the whole store file
pub async fn export_store(db: &Database) -> Result<Vec<u8>> {
    db.export_bytes().await
}

/// Replace the whole store file
pub async fn restore_store(db: &Database, bytes: &[u8]) -> Result<()> {
    db.replace_with_bytes(bytes).await
}
