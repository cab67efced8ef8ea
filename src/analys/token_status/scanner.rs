//! Contract scanner
//!
//! Chuyển source code đã verified thành [`ContractAnalysis`] bằng các detector
//! heuristic, và render analysis thành red flag nhóm CONTRACT/LIQUIDITY.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::chain_adapters::ContractSourceProvider;
use crate::errors::Result;
use crate::metric;

use super::blacklist::{has_blacklist, has_max_tx_or_wallet_limit, has_trading_cooldown, has_whitelist};
use super::liquidity::{contract_age_secs, is_liquidity_locked, is_new_contract, LpLockOracle};
use super::owner::{
    has_mint_function, has_ownership_backdoor, has_pause_function, is_ownership_renounced,
    is_proxy_contract,
};
use super::tax::{analyze_tax_rates, detect_hidden_fees};
use super::types::{
    count_severity, ContractAnalysis, ContractSource, CreationInfo, FlagCategory, IssueSeverity,
    RedFlag, SafetyCheck,
};
use super::utils::detect_honeypot;

/// Scanner phân tích tĩnh source code của contract
#[derive(Clone, Default)]
pub struct ContractScanner {
    lp_lock_oracle: Option<Arc<dyn LpLockOracle>>,
}

impl ContractScanner {
    /// Tạo scanner không có LP-lock oracle (`lp_locked` luôn false)
    pub fn new() -> Self {
        Self { lp_lock_oracle: None }
    }

    /// Gắn oracle kiểm tra khóa thanh khoản
    pub fn with_lp_lock_oracle(mut self, oracle: Arc<dyn LpLockOracle>) -> Self {
        self.lp_lock_oracle = Some(oracle);
        self
    }

    /// Phân tích source code thành `ContractAnalysis`.
    ///
    /// Source không có hoặc chưa verified là trạng thái "không thể phân tích":
    /// mọi cờ đều false và không chạy detector nào.
    pub fn scan(&self, source: &ContractSource, creation: &CreationInfo) -> ContractAnalysis {
        let source_code = match source.source_code.as_deref() {
            Some(code) if source.is_verified && !code.trim().is_empty() => code,
            _ => {
                debug!("Contract {} chưa verified, bỏ qua detector", source.address);
                return ContractAnalysis::unverified(source.address.clone(), creation);
            }
        };

        let source_lc = source_code.to_lowercase();
        let (buy_tax, sell_tax) = analyze_tax_rates(&source_lc);

        let analysis = ContractAnalysis {
            address: source.address.clone(),
            verified: true,
            is_proxy: is_proxy_contract(&source_lc),
            has_honeypot: detect_honeypot(&source_lc),
            has_mint_function: has_mint_function(&source_lc),
            has_pause_function: has_pause_function(&source_lc),
            has_blacklist: has_blacklist(&source_lc),
            has_whitelist: has_whitelist(&source_lc),
            buy_tax,
            sell_tax,
            ownership_renounced: is_ownership_renounced(&source_lc),
            lp_locked: is_liquidity_locked(self.lp_lock_oracle.as_deref(), &source.address),
            has_hidden_fees: detect_hidden_fees(&source_lc),
            has_trading_cooldown: has_trading_cooldown(&source_lc),
            has_max_tx_limit: has_max_tx_or_wallet_limit(&source_lc),
            has_ownership_backdoor: has_ownership_backdoor(&source_lc),
            creator_address: creation.creator.clone(),
            creation_timestamp: creation.timestamp,
        };

        debug!(
            "Scanned {}: proxy={} honeypot={} mint={} renounced={} tax={}/{}",
            analysis.address,
            analysis.is_proxy,
            analysis.has_honeypot,
            analysis.has_mint_function,
            analysis.ownership_renounced,
            analysis.buy_tax,
            analysis.sell_tax,
        );

        analysis
    }

    /// Render analysis thành red flag, tính tuổi contract theo thời điểm hiện tại
    pub fn to_red_flags(&self, analysis: &ContractAnalysis) -> Vec<RedFlag> {
        contract_red_flags(analysis, Utc::now())
    }

    /// Kiểm tra nhanh: fetch source, scan, render.
    ///
    /// `is_safe` chỉ đúng khi không có flag CRITICAL hay HIGH. Lỗi lấy thông tin
    /// tạo contract không làm hỏng kết quả, chỉ tắt luật tuổi contract.
    pub async fn quick_safety_check(
        &self,
        provider: &dyn ContractSourceProvider,
        address: &str,
    ) -> Result<SafetyCheck> {
        let source = provider.get_contract_source(address).await?;
        let creation = match provider.get_creation_info(address).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Không lấy được thông tin tạo contract {}: {}", address, e);
                CreationInfo::default()
            }
        };

        let analysis = self.scan(&source, &creation);
        let red_flags = self.to_red_flags(&analysis);
        let critical_count = count_severity(&red_flags, IssueSeverity::Critical);
        let high_count = count_severity(&red_flags, IssueSeverity::High);

        let check = SafetyCheck {
            address: address.to_string(),
            is_safe: critical_count == 0 && high_count == 0,
            critical_count,
            high_count,
            red_flags,
        };
        metric::record_safety_check(&check);

        Ok(check)
    }
}

/// Các luật red flag cho contract, đánh giá độc lập (có thể cùng lúc nhiều luật).
///
/// Luật "proxy + mint" cộng thêm vào luật "mint", không thay thế.
pub fn contract_red_flags(analysis: &ContractAnalysis, now: DateTime<Utc>) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    let owner_active = !analysis.ownership_renounced;

    if !analysis.verified {
        flags.push(RedFlag::new(
            IssueSeverity::Critical,
            FlagCategory::Contract,
            "Contract source code is not verified",
        ));
    }

    if analysis.has_honeypot {
        flags.push(RedFlag::new(
            IssueSeverity::Critical,
            FlagCategory::Contract,
            "Honeypot pattern detected: selling may be blocked",
        ));
    }

    if analysis.is_proxy && analysis.has_mint_function && owner_active {
        flags.push(RedFlag::new(
            IssueSeverity::Critical,
            FlagCategory::Contract,
            "Upgradeable proxy with mint function and active owner",
        ));
    }

    if analysis.has_mint_function && owner_active {
        flags.push(RedFlag::new(
            IssueSeverity::High,
            FlagCategory::Contract,
            "Owner can mint new tokens",
        ));
    }

    if analysis.has_high_tax() {
        flags.push(
            RedFlag::new(IssueSeverity::High, FlagCategory::Contract, "High transaction tax")
                .with_evidence(format!(
                    "buy tax: {}%, sell tax: {}%",
                    analysis.buy_tax, analysis.sell_tax
                )),
        );
    }

    if analysis.has_blacklist && owner_active {
        flags.push(RedFlag::new(
            IssueSeverity::Medium,
            FlagCategory::Contract,
            "Owner can blacklist addresses",
        ));
    }

    if analysis.has_pause_function && owner_active {
        flags.push(RedFlag::new(
            IssueSeverity::Medium,
            FlagCategory::Contract,
            "Owner can pause trading",
        ));
    }

    if !analysis.lp_locked && is_new_contract(analysis.creation_timestamp, now) {
        let mut flag = RedFlag::new(
            IssueSeverity::High,
            FlagCategory::Liquidity,
            "New contract with unlocked liquidity",
        );
        if let Some(age) = contract_age_secs(analysis.creation_timestamp, now) {
            flag = flag.with_evidence(format!("contract age: {} hours", age / 3600));
        }
        flags.push(flag);
    }

    flags
}
