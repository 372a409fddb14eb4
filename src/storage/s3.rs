//! AWS S3 storage implementation.
//!
//! The snapshot lives in a single object, `{bucket}/{prefix}/availability.json`,
//! replaced wholesale on every successful run.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{AppError, Result};
use crate::models::Snapshot;
use crate::storage::SnapshotStore;

/// S3-backed snapshot store.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    key: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(
        client: Client,
        bucket: impl Into<String>,
        prefix: &str,
        file_name: &str,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            key: object_key(prefix, file_name),
        }
    }

    /// Create S3 storage from environment configuration.
    ///
    /// - `S3_BUCKET`: bucket name (default: `voyage-availability`)
    /// - `S3_PREFIX`: key prefix (default: `availability`)
    pub async fn from_env(file_name: &str) -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        let bucket =
            std::env::var("S3_BUCKET").unwrap_or_else(|_| "voyage-availability".to_string());
        let prefix = std::env::var("S3_PREFIX").unwrap_or_else(|_| "availability".to_string());

        Ok(Self::new(client, bucket, &prefix, file_name))
    }

    /// Read the object, returning None if the key doesn't exist.
    async fn read_bytes_optional(&self) -> Result<Option<Vec<u8>>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output.body.collect().await.map_err(AppError::storage)?;
                Ok(Some(bytes.into_bytes().to_vec()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    log::info!("No existing snapshot at {}", self.location());
                    Ok(None)
                } else {
                    Err(AppError::storage(service_err))
                }
            }
        }
    }
}

#[async_trait]
impl SnapshotStore for S3Storage {
    async fn load(&self) -> Result<Option<Snapshot>> {
        match self.read_bytes_optional().await? {
            Some(bytes) => Ok(Some(Snapshot::from_json(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_vec(snapshot)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .body(ByteStream::from(json))
            .content_type("application/json")
            .send()
            .await
            .map_err(AppError::storage)?;

        log::info!(
            "Wrote {} voyages to {}",
            snapshot.voyage_count(),
            self.location()
        );
        Ok(())
    }

    fn location(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

fn object_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key() {
        assert_eq!(object_key("availability/", "availability.json"), "availability/availability.json");
        assert_eq!(object_key("/", "availability.json"), "availability.json");
        assert_eq!(object_key("", "a.json"), "a.json");
    }
}
