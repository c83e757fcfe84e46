use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Cover,
    Pdf,
}

impl AssetKind {
    pub fn dir(&self) -> &'static str {
        match self {
            AssetKind::Cover => "covers",
            AssetKind::Pdf => "pdfs",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredAsset {
    /// Storage-relative path, e.g. `covers/gitanjali_20250101-101010.png`.
    pub relative_path: String,
}

#[async_trait]
pub trait AssetStorage: Send + Sync {
    async fn store(
        &self,
        kind: AssetKind,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredAsset>;
    async fn read(&self, relative_path: &str) -> anyhow::Result<Vec<u8>>;
    async fn delete(&self, relative_path: &str) -> anyhow::Result<()>;
}
