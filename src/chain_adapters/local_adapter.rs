//! Local source adapter
//!
//! Đọc source code đã tải về từ một thư mục:
//! - `<address>.sol`: source code đã verified
//! - `<address>.json`: metadata tùy chọn `{ "is_verified", "creator", "timestamp" }`
//!
//! Chỉ có metadata mà không có `.sol` nghĩa là contract chưa verified.
//! Tên file dùng địa chỉ viết thường.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::analys::token_status::{ContractSource, CreationInfo};
use crate::errors::{GuardError, Result};

use super::{normalize_address, ContractSourceProvider};

fn default_verified() -> bool {
    true
}

/// Metadata đi kèm source
#[derive(Debug, Clone, Deserialize)]
struct ContractMetadata {
    #[serde(default = "default_verified")]
    is_verified: bool,
    #[serde(default)]
    creator: String,
    #[serde(default)]
    timestamp: u64,
}

/// Provider đọc từ thư mục cục bộ
#[derive(Debug, Clone)]
pub struct LocalSourceProvider {
    root: PathBuf,
}

impl LocalSourceProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, address: &str, extension: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", normalize_address(address), extension))
    }

    async fn read_metadata(&self, address: &str) -> Result<Option<ContractMetadata>> {
        let path = self.file_path(address, "json");
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path).await?;
        let metadata = serde_json::from_str(&content)
            .map_err(|e| GuardError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(Some(metadata))
    }
}

#[async_trait]
impl ContractSourceProvider for LocalSourceProvider {
    async fn get_contract_source(&self, address: &str) -> Result<ContractSource> {
        let source_path = self.file_path(address, "sol");
        let metadata = self.read_metadata(address).await?;

        if !source_path.exists() {
            return match metadata {
                Some(_) => Ok(ContractSource::unverified(address)),
                None => Err(GuardError::SourceNotFound(address.to_string())),
            };
        }

        debug!("Đọc source {} từ {}", address, source_path.display());
        let source_code = tokio::fs::read_to_string(&source_path).await?;
        Ok(ContractSource {
            address: address.to_string(),
            source_code: Some(source_code),
            is_verified: metadata.map_or(true, |m| m.is_verified),
        })
    }

    async fn get_creation_info(&self, address: &str) -> Result<CreationInfo> {
        match self.read_metadata(address).await? {
            Some(metadata) => Ok(CreationInfo {
                creator: metadata.creator,
                timestamp: metadata.timestamp,
            }),
            None if self.file_path(address, "sol").exists() => Ok(CreationInfo::default()),
            None => Err(GuardError::SourceNotFound(address.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reads_source_and_metadata() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("0xabc.sol"), "contract Token {}").unwrap();
        std::fs::write(
            dir.path().join("0xabc.json"),
            r#"{"creator": "0xdev", "timestamp": 1700000000}"#,
        )
        .unwrap();

        let provider = LocalSourceProvider::new(dir.path());
        let source = provider.get_contract_source("0xABC").await.unwrap();
        assert!(source.is_verified);
        assert_eq!(source.source_code.as_deref(), Some("contract Token {}"));

        let creation = provider.get_creation_info("0xabc").await.unwrap();
        assert_eq!(creation.creator, "0xdev");
        assert_eq!(creation.timestamp, 1_700_000_000);
    }

    #[tokio::test]
    async fn test_metadata_only_is_unverified() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("0xdef.json"), r#"{"is_verified": false}"#).unwrap();

        let provider = LocalSourceProvider::new(dir.path());
        let source = provider.get_contract_source("0xdef").await.unwrap();
        assert!(!source.is_verified);
        assert!(source.source_code.is_none());
    }

    #[tokio::test]
    async fn test_missing_contract() {
        let dir = tempdir().unwrap();
        let provider = LocalSourceProvider::new(dir.path());
        assert!(provider.get_contract_source("0x1").await.unwrap_err().is_not_found());
        assert!(provider.get_creation_info("0x1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_source_without_metadata() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("0x2.sol"), "contract A {}").unwrap();
        let provider = LocalSourceProvider::new(dir.path());
        assert_eq!(provider.get_creation_info("0x2").await.unwrap(), CreationInfo::default());
    }
}
