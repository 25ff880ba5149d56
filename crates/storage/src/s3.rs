//! S3-compatible object storage (Cloudflare R2 and friends).

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use axum::body::Bytes;
use lughat_core::media::StorageBackendKind;

use crate::{check_key, MediaStorage, StorageError, StorageResult};

/// Region name accepted by R2 and most S3-compatible providers.
const REGION: &str = "auto";

/// Connection settings for an S3-compatible bucket.
#[derive(Clone, PartialEq, Eq)]
pub struct ObjectStorageSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: String,
    pub bucket: String,
}

impl std::fmt::Debug for ObjectStorageSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStorageSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .finish()
    }
}

/// Media storage backed by a bucket, addressed path-style.
#[derive(Clone)]
pub struct ObjectStorage {
    client: Client,
    bucket: String,
}

impl ObjectStorage {
    /// Build a client with static credentials for the configured endpoint.
    pub fn new(settings: &ObjectStorageSettings) -> Self {
        let credentials = Credentials::new(
            &settings.access_key_id,
            &settings.secret_access_key,
            None,
            None,
            "lughat-env",
        );

        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(REGION))
            .endpoint_url(&settings.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            bucket: settings.bucket.clone(),
        }
    }
}

fn backend_error<E>(err: &E) -> StorageError
where
    E: std::error::Error,
{
    StorageError::Backend(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl MediaStorage for ObjectStorage {
    fn kind(&self) -> StorageBackendKind {
        StorageBackendKind::Object
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        check_key(key)?;
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| backend_error(&e))?;
        tracing::debug!(key, size, bucket = %self.bucket, "Stored media in object storage");
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        check_key(key)?;
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_no_such_key())
                {
                    return Err(StorageError::NotFound {
                        key: key.to_string(),
                    });
                }
                return Err(backend_error(&err));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(data.into_bytes())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        check_key(key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| backend_error(&e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let settings = ObjectStorageSettings {
            access_key_id: "AKID".into(),
            secret_access_key: "super-secret".into(),
            endpoint: "https://account.r2.cloudflarestorage.com".into(),
            bucket: "words".into(),
        };
        let debug = format!("{settings:?}");
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("super-secret"));
    }
}
