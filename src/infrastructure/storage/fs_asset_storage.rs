use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::asset_storage::{AssetKind, AssetStorage, StoredAsset};
use crate::infrastructure::storage::{safe_relative, timestamped_name, with_counter};

pub struct FsAssetStorage {
    pub root: PathBuf,
}

impl FsAssetStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn absolute(&self, relative: &str) -> anyhow::Result<PathBuf> {
        Ok(self.root.join(safe_relative(relative)?))
    }
}

#[async_trait]
impl AssetStorage for FsAssetStorage {
    async fn store(
        &self,
        kind: AssetKind,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredAsset> {
        fs::create_dir_all(self.root.join(kind.dir())).await?;

        let base = timestamped_name(kind, original_filename);
        let mut relative = base.clone();
        let mut counter = 1;
        while fs::try_exists(self.absolute(&relative)?).await.unwrap_or(false) {
            relative = with_counter(&base, counter);
            counter += 1;
        }

        fs::write(self.absolute(&relative)?, bytes).await?;
        tracing::debug!(path = %relative, size = bytes.len(), "asset_stored");
        Ok(StoredAsset {
            relative_path: relative,
        })
    }

    async fn read(&self, relative_path: &str) -> anyhow::Result<Vec<u8>> {
        let data = fs::read(self.absolute(relative_path)?).await?;
        Ok(data)
    }

    async fn delete(&self, relative_path: &str) -> anyhow::Result<()> {
        let path = self.absolute(relative_path)?;
        if fs::try_exists(&path).await.unwrap_or(false) {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_read_delete_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsAssetStorage::new(dir.path());

        let a = storage
            .store(AssetKind::Pdf, Some("Pather Panchali.pdf"), b"%PDF-1.4")
            .await
            .unwrap();
        let b = storage
            .store(AssetKind::Pdf, Some("Pather Panchali.pdf"), b"%PDF-1.5")
            .await
            .unwrap();
        assert!(a.relative_path.starts_with("pdfs/Pather_Panchali_"));
        assert_ne!(a.relative_path, b.relative_path);

        assert_eq!(storage.read(&a.relative_path).await.unwrap(), b"%PDF-1.4");
        storage.delete(&a.relative_path).await.unwrap();
        assert!(storage.read(&a.relative_path).await.is_err());
        storage.delete(&a.relative_path).await.unwrap();
    }

    #[tokio::test]
    async fn paths_outside_root_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsAssetStorage::new(dir.path());
        assert!(storage.read("../secret").await.is_err());
    }
}
