//! MinIO / S3-compatible object storage client.
//!
//! Wraps `aws-sdk-s3` behind the minimal [`AssetStore`] capability the
//! moderation service needs: delete an object by key, bounded by a timeout.
//! Uploads happen in the profile service; this subsystem only ever removes
//! rejected photos.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Builder as S3Builder, Credentials, Region},
    Client,
};
use ember_common::config::StorageConfig;
use ember_moderation::store::{AssetStore, DeleteOutcome};
use std::time::Duration;

/// S3/MinIO storage client — wraps the AWS SDK.
#[derive(Debug, Clone)]
pub struct StorageClient {
    inner: Client,
    bucket: String,
    delete_timeout: Duration,
}

impl StorageClient {
    /// Initialise client from config.
    pub fn new(cfg: &StorageConfig) -> Result<Self> {
        let creds = Credentials::new(
            &cfg.access_key,
            &cfg.secret_key,
            None, // session token
            None, // expiry
            "ember-storage",
        );

        let s3_cfg = S3Builder::new()
            .endpoint_url(&cfg.endpoint)
            .credentials_provider(creds)
            .region(Region::new(cfg.region.clone()))
            // Force path-style URLs (required for MinIO)
            .force_path_style(true)
            .build();

        Ok(Self {
            inner: Client::from_conf(s3_cfg),
            bucket: cfg.bucket.clone(),
            delete_timeout: Duration::from_secs(cfg.delete_timeout_secs),
        })
    }

    /// Ensure the bucket exists; create it if absent.
    pub async fn ensure_bucket(&self) -> Result<()> {
        match self.inner.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                tracing::debug!(bucket = %self.bucket, "Bucket already exists");
                Ok(())
            }
            Err(_) => {
                tracing::info!(bucket = %self.bucket, "Bucket does not exist, creating");
                self.inner
                    .create_bucket()
                    .bucket(&self.bucket)
                    .send()
                    .await
                    .context("Failed to create object storage bucket")?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AssetStore for StorageClient {
    /// Delete an object by its storage key, bounded by the configured
    /// timeout. A timed-out call reports failure just like an explicit
    /// error from the provider. A 404 from the provider counts as
    /// [`DeleteOutcome::NotFound`] — the object is already gone.
    async fn delete_object(&self, key: &str) -> Result<DeleteOutcome> {
        let send = self
            .inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send();

        let result = tokio::time::timeout(self.delete_timeout, send)
            .await
            .map_err(|_| {
                anyhow!(
                    "Delete of {key} timed out after {}s",
                    self.delete_timeout.as_secs()
                )
            })?;

        match result {
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(err) => {
                let already_gone = err
                    .raw_response()
                    .is_some_and(|r| r.status().as_u16() == 404);
                if already_gone {
                    Ok(DeleteOutcome::NotFound)
                } else {
                    Err(err).with_context(|| format!("Failed to delete {key} from object storage"))
                }
            }
        }
    }
}
