//! Module token_status
//!
//! Module này chịu trách nhiệm phân tích tĩnh source code của token contract, bao gồm:
//! - Phân tích quyền hạn owner, renounce, backdoor, proxy
//! - Phân tích tax/fee, phí ẩn
//! - Phân tích blacklist/whitelist, các cơ chế giới hạn
//! - Phân tích thanh khoản và tuổi contract
//! - Render kết quả phân tích thành red flag

// Định nghĩa các kiểu cơ bản cho token_status
mod types;

// Phân tích owner, renounce, backdoor, proxy
mod owner;

// Phân tích tax, hidden fee
mod tax;

// Phân tích blacklist/whitelist
mod blacklist;

// Phân tích thanh khoản, tuổi contract
mod liquidity;

// Các tiện ích chung, honeypot detector
mod utils;

// Scanner tổng hợp các detector
mod scanner;

pub use types::{
    count_severity, ContractAnalysis, ContractSource, CreationInfo, FlagCategory, IssueSeverity,
    RedFlag, SafetyCheck, NEW_CONTRACT_AGE_SECS, TAX_DANGEROUS,
};

// Re-export các detector chính
pub use owner::{
    has_mint_function, has_ownership_backdoor, has_pause_function, is_ownership_renounced,
    is_proxy_contract,
};

pub use tax::{analyze_tax_rates, detect_hidden_fees};

pub use blacklist::{has_blacklist, has_max_tx_or_wallet_limit, has_trading_cooldown, has_whitelist};

pub use liquidity::{contract_age_secs, is_liquidity_locked, is_new_contract, LpLockOracle};

pub use utils::{detect_honeypot, HoneypotDetector};

pub use scanner::{contract_red_flags, ContractScanner};
