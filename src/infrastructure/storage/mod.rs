mod core;
mod fs_asset_storage;
mod s3_asset_storage;
pub use self::core::*;

pub mod fs {
    pub use super::fs_asset_storage::*;
}
pub mod s3 {
    pub use super::s3_asset_storage::*;
}
