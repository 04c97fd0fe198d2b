//! File storage for storage-enabled string properties.

use crate::error::{DataSourceError, DataSourceResult};
use async_trait::async_trait;
use quire_model::StorageConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    /// Folder within the bucket, usually the property's `storage_path`.
    pub path: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Where an uploaded file ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Full storage path (`folder/file_name`).
    pub path: String,
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Result of resolving a stored path to something displayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileMetadata>,
    #[serde(default)]
    pub file_not_found: bool,
}

/// Abstract file storage interface.
#[async_trait]
pub trait StorageSource: Send + Sync {
    async fn upload_file(&self, upload: FileUpload) -> DataSourceResult<UploadedFile>;

    /// Resolves a storage path. Missing files are reported with
    /// `file_not_found`, not as an error.
    async fn get_download_url(&self, path: &str) -> DataSourceResult<DownloadConfig>;

    async fn delete_file(&self, path: &str) -> DataSourceResult<()>;
}

/// Checks an upload against the property's storage config.
pub fn check_upload(config: &StorageConfig, upload: &FileUpload) -> DataSourceResult<()> {
    let size = upload.bytes.len() as u64;
    match config.max_size {
        Some(max) if size > max => return Err(DataSourceError::FileTooLarge { size, max }),
        _ => {}
    }
    if !config.accepted_files.is_empty()
        && !config.accepted_files.iter().any(|pattern| accepts(pattern, upload))
    {
        return Err(DataSourceError::UnacceptedFile {
            file_name: upload.file_name.clone(),
        });
    }
    Ok(())
}

/// Matches `image/*`, `image/png` or `.png` style patterns.
fn accepts(pattern: &str, upload: &FileUpload) -> bool {
    if let Some(extension) = pattern.strip_prefix('.') {
        return upload
            .file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(extension));
    }
    let Some(content_type) = upload.content_type.as_deref() else {
        return false;
    };
    match pattern.strip_suffix("/*") {
        Some(family) => content_type.split('/').next() == Some(family),
        None => content_type == pattern,
    }
}

#[derive(Debug, Clone)]
struct StoredFile {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// File storage kept in process memory.
#[derive(Debug, Clone)]
pub struct MemoryStorageSource {
    base_url: String,
    files: Arc<Mutex<HashMap<String, StoredFile>>>,
}

impl MemoryStorageSource {
    /// `base_url` prefixes download URLs, e.g. `memory://bucket`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            files: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn files(&self) -> MutexGuard<'_, HashMap<String, StoredFile>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Default for MemoryStorageSource {
    fn default() -> Self {
        Self::new("memory://quire")
    }
}

#[async_trait]
impl StorageSource for MemoryStorageSource {
    async fn upload_file(&self, upload: FileUpload) -> DataSourceResult<UploadedFile> {
        let folder = upload.path.trim_matches('/');
        let path = if folder.is_empty() {
            upload.file_name.clone()
        } else {
            format!("{}/{}", folder, upload.file_name)
        };
        self.files().insert(
            path.clone(),
            StoredFile {
                bytes: upload.bytes,
                content_type: upload.content_type,
            },
        );
        Ok(UploadedFile {
            download_url: self.url_for(&path),
            path,
        })
    }

    async fn get_download_url(&self, path: &str) -> DataSourceResult<DownloadConfig> {
        let files = self.files();
        Ok(match files.get(path) {
            Some(file) => DownloadConfig {
                url: Some(self.url_for(path)),
                metadata: Some(FileMetadata {
                    size: file.bytes.len() as u64,
                    content_type: file.content_type.clone(),
                }),
                file_not_found: false,
            },
            None => DownloadConfig {
                url: None,
                metadata: None,
                file_not_found: true,
            },
        })
    }

    async fn delete_file(&self, path: &str) -> DataSourceResult<()> {
        self.files().remove(path);
        Ok(())
    }
}
