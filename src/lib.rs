//! DiamondChain ScamGuard Library
//!
//! Engine đánh giá rủi ro scam cho token smart contract. Crate cung cấp:
//! - [`ContractScanner`]: phân tích tĩnh source code đã verified thành [`ContractAnalysis`]
//! - [`RiskAnalyzer`]: tổng hợp red flag, chấm điểm 5 chiều và đưa ra khuyến nghị
//! - [`PatternRegistry`]: snapshot chỉ đọc các scam pattern, load từ [`PatternStore`]
//!
//! Engine không thực thi hay mô phỏng bytecode; mọi phân tích là heuristic trên văn bản.

pub mod errors;
pub mod config;
pub mod metric;
pub mod chain_adapters;
pub mod analys;

// Re-export cấu trúc dữ liệu quan trọng từ config
pub use crate::config::initialize_default_config;

pub use crate::errors::{GuardError, Result};

pub use crate::analys::token_status::{
    ContractAnalysis, ContractScanner, ContractSource, CreationInfo, FlagCategory, IssueSeverity,
    LpLockOracle, RedFlag, SafetyCheck,
};

pub use crate::analys::risk_analyzer::{
    AssessmentInput, CommunityAnalysis, HolderInfo, Indicator, PatternRegistry, PatternStore,
    ProjectData, Recommendation, RiskAnalyzer, RiskScore, ScamPattern, TeamAnalysis, TeamMember,
    TokenomicsAnalysis,
};

pub use crate::chain_adapters::{ContractSourceProvider, InMemorySourceProvider, LocalSourceProvider};

use anyhow::Context;
use tracing::info;

/// Initialize logging
pub fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global default subscriber")?;

    info!("Logging initialized at {} level", log_level);
    Ok(())
}

/// Version information
pub mod version {
    /// Current version from Cargo.toml
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Package name from Cargo.toml
    pub const NAME: &str = env!("CARGO_PKG_NAME");
}

/// Get a greeting message
pub fn greeting() -> String {
    format!("DiamondChain ScamGuard v{}", version::VERSION)
}
