//! Module chain_adapters
//!
//! Nguồn dữ liệu contract cho scanner:
//! - Trait [`ContractSourceProvider`]: lấy source code và thông tin tạo contract
//! - In-memory provider: dữ liệu nạp sẵn, dùng cho test và tích hợp
//! - Local adapter: đọc source từ thư mục cục bộ (`<address>.sol` + `<address>.json`)
//!
//! Client explorer/RPC thật nằm ngoài crate này và chỉ cần implement trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::analys::token_status::{ContractSource, CreationInfo};
use crate::errors::{GuardError, Result};

pub mod local_adapter;

pub use local_adapter::LocalSourceProvider;

/// Nguồn source code và thông tin tạo contract
#[async_trait]
pub trait ContractSourceProvider: Send + Sync {
    /// Lấy source code của contract
    ///
    /// # Errors
    /// * `SourceNotFound` nếu provider không biết địa chỉ này
    async fn get_contract_source(&self, address: &str) -> Result<ContractSource>;

    /// Lấy địa chỉ deploy và thời điểm tạo contract
    async fn get_creation_info(&self, address: &str) -> Result<CreationInfo>;
}

/// Chuẩn hóa địa chỉ để tra cứu
pub(crate) fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Provider trong bộ nhớ
#[derive(Debug, Default)]
pub struct InMemorySourceProvider {
    contracts: RwLock<HashMap<String, (ContractSource, CreationInfo)>>,
}

impl InMemorySourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thêm hoặc thay thế một contract
    pub async fn insert(&self, source: ContractSource, creation: CreationInfo) {
        let key = normalize_address(&source.address);
        self.contracts.write().await.insert(key, (source, creation));
    }
}

#[async_trait]
impl ContractSourceProvider for InMemorySourceProvider {
    async fn get_contract_source(&self, address: &str) -> Result<ContractSource> {
        self.contracts
            .read()
            .await
            .get(&normalize_address(address))
            .map(|(source, _)| source.clone())
            .ok_or_else(|| GuardError::SourceNotFound(address.to_string()))
    }

    async fn get_creation_info(&self, address: &str) -> Result<CreationInfo> {
        self.contracts
            .read()
            .await
            .get(&normalize_address(address))
            .map(|(_, creation)| creation.clone())
            .ok_or_else(|| GuardError::SourceNotFound(address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_provider_lookup_is_case_insensitive() {
        let provider = InMemorySourceProvider::new();
        provider
            .insert(
                ContractSource::verified("0xABCdef", "contract a {}"),
                CreationInfo { creator: "0xdev".to_string(), timestamp: 10 },
            )
            .await;

        let source = provider.get_contract_source("0xabcDEF").await.unwrap();
        assert!(source.is_verified);
        let creation = provider.get_creation_info("0xabcdef").await.unwrap();
        assert_eq!(creation.timestamp, 10);

        let missing = provider.get_contract_source("0x0").await.unwrap_err();
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_insert_replaces_existing_entry() {
        let provider = InMemorySourceProvider::new();
        tokio_test::block_on(async {
            provider
                .insert(ContractSource::unverified("0xabc"), CreationInfo::default())
                .await;
            provider
                .insert(ContractSource::verified("0xabc", "contract a {}"), CreationInfo::default())
                .await;
        });

        let source = tokio_test::block_on(provider.get_contract_source("0xabc")).unwrap();
        assert!(source.is_verified);
    }
}
