//! Định nghĩa các kiểu dữ liệu cho phân tích contract và red flag

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ngưỡng tax (%) coi là cao
pub const TAX_DANGEROUS: u8 = 10;
/// Tuổi contract tối thiểu (giây) trước khi thanh khoản chưa khóa hết bị coi là rủi ro
pub const NEW_CONTRACT_AGE_SECS: i64 = 7 * 24 * 3600;

/// Mức độ nghiêm trọng của red flag.
///
/// Thứ tự khai báo là thứ tự hiển thị: `Critical < High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Critical => "CRITICAL",
            IssueSeverity::High => "HIGH",
            IssueSeverity::Medium => "MEDIUM",
            IssueSeverity::Low => "LOW",
        }
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nhóm phân tích mà red flag thuộc về
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagCategory {
    Contract,
    Tokenomics,
    Team,
    Community,
    Liquidity,
}

impl Default for FlagCategory {
    fn default() -> Self {
        FlagCategory::Contract
    }
}

impl FlagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagCategory::Contract => "CONTRACT",
            FlagCategory::Tokenomics => "TOKENOMICS",
            FlagCategory::Team => "TEAM",
            FlagCategory::Community => "COMMUNITY",
            FlagCategory::Liquidity => "LIQUIDITY",
        }
    }
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Một dấu hiệu rủi ro đơn lẻ. Tạo ra trong lúc đánh giá và không bao giờ bị sửa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub severity: IssueSeverity,
    pub category: FlagCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl RedFlag {
    pub fn new(severity: IssueSeverity, category: FlagCategory, description: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            description: description.into(),
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    /// Dạng hiển thị `"[SEVERITY] description"`
    pub fn to_warning(&self) -> String {
        format!("[{}] {}", self.severity, self.description)
    }
}

/// Đếm số red flag theo mức độ
pub fn count_severity(flags: &[RedFlag], severity: IssueSeverity) -> usize {
    flags.iter().filter(|flag| flag.severity == severity).count()
}

/// Source code của contract do explorer trả về
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractSource {
    /// Địa chỉ contract
    pub address: String,
    /// Source code (nếu đã verified)
    pub source_code: Option<String>,
    /// Có verified trên explorer không
    pub is_verified: bool,
}

impl ContractSource {
    pub fn verified(address: impl Into<String>, source_code: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            source_code: Some(source_code.into()),
            is_verified: true,
        }
    }

    pub fn unverified(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            source_code: None,
            is_verified: false,
        }
    }
}

/// Thông tin tạo contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationInfo {
    /// Địa chỉ ví deploy
    pub creator: String,
    /// Unix timestamp (giây), 0 nếu không rõ
    pub timestamp: u64,
}

/// Kết quả phân tích tĩnh source code của contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    /// Địa chỉ contract
    pub address: String,
    /// Source đã verified và được phân tích
    pub verified: bool,
    /// Proxy / upgradeable
    pub is_proxy: bool,
    /// Có dấu hiệu mua được nhưng không bán được
    pub has_honeypot: bool,
    pub has_mint_function: bool,
    pub has_pause_function: bool,
    pub has_blacklist: bool,
    pub has_whitelist: bool,
    /// Thuế mua, phần trăm nguyên 0-100
    pub buy_tax: u8,
    /// Thuế bán, phần trăm nguyên 0-100
    pub sell_tax: u8,
    pub ownership_renounced: bool,
    /// Luôn false nếu không có LP-lock oracle
    pub lp_locked: bool,
    /// Có hàm set/đổi fee hoặc miễn fee
    #[serde(default)]
    pub has_hidden_fees: bool,
    /// Có cooldown giữa các giao dịch
    #[serde(default)]
    pub has_trading_cooldown: bool,
    /// Có giới hạn max tx hoặc max wallet
    #[serde(default)]
    pub has_max_tx_limit: bool,
    /// Có hàm lấy lại quyền owner sau khi renounce
    #[serde(default)]
    pub has_ownership_backdoor: bool,
    pub creator_address: String,
    /// Unix timestamp (giây), 0 nếu không rõ
    pub creation_timestamp: u64,
}

impl ContractAnalysis {
    /// Trạng thái "không thể phân tích": mọi cờ đều false
    pub fn unverified(address: impl Into<String>, creation: &CreationInfo) -> Self {
        Self {
            address: address.into(),
            creator_address: creation.creator.clone(),
            creation_timestamp: creation.timestamp,
            ..Default::default()
        }
    }

    pub fn has_high_tax(&self) -> bool {
        self.buy_tax > TAX_DANGEROUS || self.sell_tax > TAX_DANGEROUS
    }
}

/// Kết quả kiểm tra nhanh một contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyCheck {
    pub address: String,
    pub is_safe: bool,
    pub critical_count: usize,
    pub high_count: usize,
    pub red_flags: Vec<RedFlag>,
}
