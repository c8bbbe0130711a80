// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::pages::Page;
use crate::utils::error::StorageError;

/// Manifest record for one generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub title: String,
    pub nav_order: Option<u32>,
    pub content_length: usize,
}

impl ManifestEntry {
    pub fn for_page(page: &Page) -> Self {
        Self {
            path: page.path.clone(),
            title: page.prologue.title.clone(),
            nav_order: page.prologue.nav_order,
            content_length: page.body.len(),
        }
    }
}

pub struct PageWriter {
    base_dir: PathBuf,
}

impl PageWriter {
    /// Creates a new PageWriter, creating the output directory if needed
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
            tracing::debug!("Created output directory {}", base_path.display());
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Renders the page and writes it, replacing any previous version
    pub fn write_page(&self, page: &Page) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(&page.path);
        self.ensure_parent(&file_path)?;

        fs::write(&file_path, page.render()).map_err(StorageError::IoError)?;

        tracing::info!("Wrote page '{}' to {}", page.prologue.title, file_path.display());
        Ok(file_path)
    }

    /// Saves the list of generated pages in JSON format
    pub fn write_manifest(
        &self,
        name: &Path,
        entries: &[ManifestEntry],
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(name);
        self.ensure_parent(&file_path)?;

        let manifest = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "page_count": entries.len(),
            "pages": entries,
        });

        let manifest_str = serde_json::to_string_pretty(&manifest)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, manifest_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved manifest to {}", file_path.display());
        Ok(file_path)
    }

    fn ensure_parent(&self, file_path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }
        Ok(())
    }
}
