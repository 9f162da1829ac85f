//! Report document loading and caching
//!
//! The dashboard reads one report file. `DocumentCache` keeps the parsed
//! document until the file's modification time changes or a refresh is
//! requested. The lock is only held for the swap, never across an await.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;
use tracing::{debug, info, warn};

use domain_reporting::ReportDocument;
use crate::error::DashboardError;

/// Reads and parses the report at `path`
pub fn load_document(path: &Path) -> Result<ReportDocument, DashboardError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DashboardError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io(e),
    })?;

    let document = ReportDocument::from_json(&text).map_err(|e| DashboardError::SchemaMismatch {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    if let Err(e) = document.verify() {
        warn!(path = %path.display(), error = %e, "Report document failed consistency checks");
    }
    Ok(document)
}

#[derive(Debug)]
struct CachedDocument {
    document: Arc<ReportDocument>,
    modified: Option<SystemTime>,
}

/// Single-slot cache for the dashboard's report document
#[derive(Debug)]
pub struct DocumentCache {
    path: PathBuf,
    slot: RwLock<Option<CachedDocument>>,
}

impl DocumentCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a document is currently held
    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn modified(&self) -> Result<Option<SystemTime>, DashboardError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.modified().ok()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DashboardError::DocumentNotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(DashboardError::Io(e)),
        }
    }

    /// Returns the cached document, loading it on first use or when the
    /// file has changed since it was cached
    pub fn get(&self) -> Result<Arc<ReportDocument>, DashboardError> {
        let modified = match self.modified() {
            Ok(modified) => modified,
            Err(e) => {
                self.invalidate();
                return Err(e);
            }
        };

        {
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = slot.as_ref() {
                if modified.is_some() && cached.modified == modified {
                    return Ok(Arc::clone(&cached.document));
                }
                debug!(path = %self.path.display(), "Report document changed on disk");
            }
        }
        self.reload(modified)
    }

    /// Drops the cached document and loads the file again
    pub fn refresh(&self) -> Result<Arc<ReportDocument>, DashboardError> {
        self.invalidate();
        let modified = self.modified()?;
        self.reload(modified)
    }

    /// Drops the cached document
    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn reload(&self, modified: Option<SystemTime>) -> Result<Arc<ReportDocument>, DashboardError> {
        let document = Arc::new(load_document(&self.path)?);
        info!(path = %self.path.display(), "Report document loaded");

        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(CachedDocument {
            document: Arc::clone(&document),
            modified,
        });
        Ok(document)
    }
}
