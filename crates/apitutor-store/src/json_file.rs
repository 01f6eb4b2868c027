//! JSON file store
//!
//! The whole store is a single JSON document. It is parsed once at startup
//! and kept in memory; every mutation rewrites the file in full.

use apitutor_core::{
    models::{CallLogEntry, Customer, Document},
    traits::{CallLogRepository, CustomerRepository},
    AppError, AppResult,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

/// File-backed implementation of both repositories
///
/// All reads and writes go through one async mutex that is held across the
/// file write, so read-modify-write sequences never interleave. The file is
/// replaced by writing a sibling temp file and renaming it over the old one.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: Mutex<Document>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating and seeding it if absent
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the file cannot be read or written and
    /// `AppError::Serialization` if it does not hold a JSON object.
    #[instrument]
    pub async fn open(path: impl AsRef<Path> + std::fmt::Debug) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let document = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => {
                info!(path = %path.display(), "Store file is empty, seeding");
                Document::seeded()
            }
            Ok(raw) => Document::from_json(&raw).map_err(|e| {
                error!(path = %path.display(), "Store file is not a valid document: {}", e);
                AppError::Serialization(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Store file not found, seeding");
                Document::seeded()
            }
            Err(e) => {
                error!(path = %path.display(), "Failed to read store file: {}", e);
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        // Write back so defaults filled in above reach the disk
        write_document(&path, &document).await?;

        info!(
            path = %path.display(),
            customers = document.customers.len(),
            calls = document.calls.len(),
            "Store opened"
        );

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the document, persist it, then publish it.
    ///
    /// If the write fails the in-memory document is left untouched.
    async fn mutate<T>(&self, change: impl FnOnce(&mut Document) -> T) -> AppResult<T> {
        let mut guard = self.document.lock().await;
        let mut next = guard.clone();
        let result = change(&mut next);
        write_document(&self.path, &next).await?;
        *guard = next;
        Ok(result)
    }

    async fn read<T>(&self, view: impl FnOnce(&Document) -> T) -> T {
        let guard = self.document.lock().await;
        view(&guard)
    }
}

async fn write_document(path: &Path, document: &Document) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let body = serde_json::to_vec_pretty(document)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &body).await.map_err(|e| {
        error!(path = %tmp.display(), "Failed to write store file: {}", e);
        AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
    })?;
    tokio::fs::rename(&tmp, path).await.map_err(|e| {
        error!(path = %path.display(), "Failed to replace store file: {}", e);
        AppError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), bytes = body.len(), "Store written");
    Ok(())
}

#[async_trait]
impl CustomerRepository for JsonFileStore {
    async fn list(&self) -> AppResult<Vec<Customer>> {
        Ok(self.read(|doc| doc.customers.clone()).await)
    }

    async fn find(&self, id: &str) -> AppResult<Option<Customer>> {
        Ok(self
            .read(|doc| doc.customers.iter().find(|c| c.id == id).cloned())
            .await)
    }

    async fn insert(&self, customer: Customer) -> AppResult<Customer> {
        let stored = customer.clone();
        self.mutate(move |doc| doc.customers.push(customer)).await?;
        Ok(stored)
    }

    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>> {
        let mut guard = self.document.lock().await;
        let Some(index) = guard.customers.iter().position(|c| c.id == customer.id) else {
            return Ok(None);
        };

        let mut next = guard.clone();
        next.customers[index] = customer.clone();
        write_document(&self.path, &next).await?;
        *guard = next;

        Ok(Some(customer))
    }

    async fn remove(&self, id: &str) -> AppResult<bool> {
        let mut guard = self.document.lock().await;
        if !guard.customers.iter().any(|c| c.id == id) {
            return Ok(false);
        }

        let mut next = guard.clone();
        next.customers.retain(|c| c.id != id);
        write_document(&self.path, &next).await?;
        *guard = next;

        Ok(true)
    }

    async fn replace_all(&self, customers: Vec<Customer>) -> AppResult<()> {
        self.mutate(move |doc| doc.customers = customers).await
    }
}

#[async_trait]
impl CallLogRepository for JsonFileStore {
    async fn append(&self, entry: CallLogEntry) -> AppResult<()> {
        self.mutate(move |doc| doc.calls.push(entry)).await
    }

    async fn list(&self) -> AppResult<Vec<CallLogEntry>> {
        Ok(self.read(|doc| doc.calls.clone()).await)
    }
}
