use anyhow::{Context, anyhow};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::PathBuf;

use crate::application::ports::asset_storage::{AssetKind, AssetStorage, StoredAsset};
use crate::bootstrap::config::Config;
use crate::infrastructure::storage::{normalize_prefix, safe_relative, timestamped_name, with_counter};

/// Book covers and PDFs kept in an S3-compatible bucket under `<prefix>/covers|pdfs/`.
pub struct S3AssetStorage {
    client: Client,
    bucket: String,
    prefix: String,
}

async fn build_client(cfg: &Config) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = cfg.s3_region.clone() {
        loader = loader.region(Region::new(region));
    }
    let shared = loader.load().await;

    let mut conf = aws_sdk_s3::config::Builder::from(&shared).force_path_style(cfg.s3_use_path_style);
    if let (Some(key), Some(secret)) = (cfg.s3_access_key.clone(), cfg.s3_secret_key.clone()) {
        conf = conf.credentials_provider(Credentials::new(
            key,
            secret,
            None,
            None,
            "nakshatra-s3-static",
        ));
    }
    if let Some(endpoint) = cfg.s3_endpoint.clone() {
        conf = conf.endpoint_url(endpoint);
    }
    Client::from_conf(conf.build())
}

impl S3AssetStorage {
    pub async fn new(cfg: &Config) -> anyhow::Result<Self> {
        let bucket = cfg
            .s3_bucket
            .clone()
            .context("S3_BUCKET is required for the s3 storage backend")?;
        let client = build_client(cfg).await;
        ensure_bucket(&client, &bucket).await?;
        tracing::info!(bucket = %bucket, "s3_asset_storage_ready");
        Ok(Self {
            client,
            bucket,
            prefix: normalize_prefix(&PathBuf::from(&cfg.storage_root)),
        })
    }

    fn key_for(&self, relative: &str) -> anyhow::Result<String> {
        let rel = safe_relative(relative)?.to_string_lossy().replace('\\', "/");
        if self.prefix.is_empty() {
            return Ok(rel);
        }
        Ok(format!("{}/{rel}", self.prefix))
    }

    async fn is_taken(&self, key: &str) -> anyhow::Result<bool> {
        let res = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;
        match res {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(e)) if e.err().is_not_found() => Ok(false),
            Err(e) => Err(anyhow!("head_object {key}: {e}")),
        }
    }
}

#[async_trait]
impl AssetStorage for S3AssetStorage {
    async fn store(
        &self,
        kind: AssetKind,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredAsset> {
        let base = timestamped_name(kind, original_filename);
        let mut relative = base.clone();
        for n in 1.. {
            if !self.is_taken(&self.key_for(&relative)?).await? {
                break;
            }
            relative = with_counter(&base, n);
        }

        let key = self.key_for(&relative)?;
        let mime = mime_guess::from_path(&relative).first_or_octet_stream();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(mime.essence_str())
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .with_context(|| format!("put_object {key}"))?;
        tracing::debug!(key = %key, size = bytes.len(), "asset_stored");

        Ok(StoredAsset {
            relative_path: relative,
        })
    }

    async fn read(&self, relative_path: &str) -> anyhow::Result<Vec<u8>> {
        let key = self.key_for(relative_path)?;
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .with_context(|| format!("get_object {key}"))?;
        let body = object
            .body
            .collect()
            .await
            .with_context(|| format!("read body of {key}"))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn delete(&self, relative_path: &str) -> anyhow::Result<()> {
        let key = self.key_for(relative_path)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .with_context(|| format!("delete_object {key}"))?;
        Ok(())
    }
}

async fn ensure_bucket(client: &Client, bucket: &str) -> anyhow::Result<()> {
    if client.head_bucket().bucket(bucket).send().await.is_ok() {
        return Ok(());
    }
    match client.create_bucket().bucket(bucket).send().await {
        Ok(_) => {
            tracing::info!(bucket = %bucket, "s3_bucket_created");
            Ok(())
        }
        Err(SdkError::ServiceError(e))
            if matches!(
                e.err(),
                CreateBucketError::BucketAlreadyOwnedByYou(_)
                    | CreateBucketError::BucketAlreadyExists(_)
            ) =>
        {
            Ok(())
        }
        Err(e) => Err(anyhow!("create bucket {bucket}: {e}")),
    }
}
