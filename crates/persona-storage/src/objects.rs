use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StorageError;
use crate::store::ObjectStore;

/// Read and decode a JSON object.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get_object(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Read and decode a JSON object, mapping a missing key to `None`.
pub async fn find_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match get_json(store, key).await {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Encode and write a JSON object.
pub async fn put_json<T: Serialize>(
    store: &dyn ObjectStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    store.put_object(key, body).await
}

/// Decode every JSON object under a prefix.
///
/// Objects that fail to decode are logged and skipped so one corrupt entry
/// does not hide the rest.
pub async fn list_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list_objects(prefix).await?;

    let mut values = Vec::with_capacity(keys.len());
    for key in &keys {
        let body = match store.get_object(key).await {
            Ok(body) => body,
            Err(StorageError::NotFound { .. }) => continue,
            Err(e) => return Err(e),
        };
        match serde_json::from_slice(&body) {
            Ok(value) => values.push(value),
            Err(e) => warn!(key = %key, error = %e, "skipping undecodable object"),
        }
    }
    Ok(values)
}
