use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::store::{validate_key, BoxFuture, ObjectStore};

const TMP_SUFFIX: &str = ".tmp";

/// Store rooted at a local directory; each key maps to one file.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |p, seg| p.join(seg)))
    }
}

fn io_err(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

/// Write `body` to a uniquely named temp file in `dir`, then rename it over
/// `path`. Readers see either the old body or the new one, and concurrent
/// writers to one key never share a temp file.
fn write_atomic(dir: &Path, path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(TMP_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(body)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl ObjectStore for FsStore {
    fn get_object<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::read(&path).await {
                Ok(body) => Ok(body),
                Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                    key: key.to_string(),
                }),
                Err(e) => Err(io_err(key, e)),
            }
        })
    }

    fn put_object<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.root.clone());
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| io_err(key, e))?;

            let bytes = body.len();
            tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &body))
                .await
                .map_err(|e| io_err(key, std::io::Error::other(e)))?
                .map_err(|e| io_err(key, e))?;

            debug!(key, bytes, "object written");
            Ok(())
        })
    }

    fn list_objects<'a>(
        &'a self,
        prefix: &'a str,
    ) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move {
            let mut keys = Vec::new();
            let mut pending = vec![(self.root.clone(), String::new())];

            while let Some((dir, dir_key)) = pending.pop() {
                let mut entries = match tokio::fs::read_dir(&dir).await {
                    Ok(entries) => entries,
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(io_err(&dir_key, e)),
                };

                while let Some(entry) = entries
                    .next_entry()
                    .await
                    .map_err(|e| io_err(&dir_key, e))?
                {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let key = format!("{dir_key}{name}");
                    let file_type = entry.file_type().await.map_err(|e| io_err(&key, e))?;

                    if file_type.is_dir() {
                        let child = format!("{key}/");
                        // Only descend where a match is still possible.
                        if child.starts_with(prefix) || prefix.starts_with(&child) {
                            pending.push((entry.path(), child));
                        }
                    } else if !name.ends_with(TMP_SUFFIX) && key.starts_with(prefix) {
                        keys.push(key);
                    }
                }
            }

            keys.sort();
            Ok(keys)
        })
    }
}
