use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use bytes::Bytes;
use tracing::info;

use crate::error::StorageError;
use crate::pipeline::runner::BlobStore;

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
    pub bucket: String,
}

impl StorageService {
    pub async fn new(endpoint: &str, bucket: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("✅ Connected to S3 (MinIO)");

        Self {
            client,
            bucket: bucket.to_string(),
        }
    }

    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::Download {
                        key: key.to_string(),
                        message: service.to_string(),
                    }
                }
            })?;

        let body = result
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Download {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(body.into_bytes().to_vec())
    }

    pub async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.into_service_error().to_string(),
            })?;

        Ok(())
    }

    /// Time-limited GET link for a stored object.
    pub async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let presign_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::Presign {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::Presign {
                key: key.to_string(),
                message: e.into_service_error().to_string(),
            })?;

        Ok(presigned.uri().to_string())
    }

    /// Time-limited PUT link so clients upload straight to the bucket.
    pub async fn presign_put(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let presign_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::Presign {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::Presign {
                key: key.to_string(),
                message: e.into_service_error().to_string(),
            })?;

        Ok(presigned.uri().to_string())
    }
}

#[async_trait]
impl BlobStore for StorageService {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.get_object(key).await
    }

    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.put_object(key, body, content_type).await
    }
}
