//! Blob storage for uploaded product images.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Bucket name holding product images, both on disk and in image URLs.
pub const IMAGE_BUCKET: &str = "product-images";

/// Failure raised when persisting a blob.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to store blob '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal put-only blob store. Keys are flat file names within a bucket.
pub trait BlobStore {
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;
}

/// Blob store writing into a directory served as static files.
#[derive(Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.root.join(key), bytes).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::{BlobStore, StorageError, StorageResult};

    /// In-memory blob store used by service unit tests.
    #[derive(Default)]
    pub struct MemoryBlobStore {
        pub blobs: Mutex<HashMap<String, Vec<u8>>>,
        pub fail: bool,
    }

    impl MemoryBlobStore {
        pub fn failing() -> Self {
            Self {
                blobs: Mutex::default(),
                fail: true,
            }
        }
    }

    impl BlobStore for MemoryBlobStore {
        fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
            if self.fail {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::other("bucket unavailable"),
                });
            }
            self.blobs
                .lock()
                .unwrap()
                .insert(key.to_string(), bytes.to_vec());
            Ok(())
        }
    }
}
