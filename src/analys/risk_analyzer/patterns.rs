//! Scam pattern registry
//!
//! Registry là một snapshot chỉ đọc của các scam signature, được load từ một
//! [`PatternStore`] trước khi đánh giá và truyền vào [`super::RiskAnalyzer`].
//! Tên indicator trong pattern được ánh xạ sang enum [`Indicator`]; tên không
//! nhận ra được thì không bao giờ khớp và được báo qua [`PatternRegistry::drift`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::analys::token_status::{ContractAnalysis, FlagCategory, IssueSeverity, RedFlag};
use crate::errors::{GuardError, Result};

/// Một scam signature có tên
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamPattern {
    pub pattern_type: String,
    pub description: String,
    /// Tên indicator, khớp theo OR
    pub indicators: Vec<String>,
    pub severity: IssueSeverity,
    #[serde(default)]
    pub category: FlagCategory,
}

impl ScamPattern {
    pub fn new(
        pattern_type: impl Into<String>,
        description: impl Into<String>,
        indicators: &[&str],
        severity: IssueSeverity,
        category: FlagCategory,
    ) -> Self {
        Self {
            pattern_type: pattern_type.into(),
            description: description.into(),
            indicators: indicators.iter().map(|name| name.to_string()).collect(),
            severity,
            category,
        }
    }
}

/// Các indicator mà engine nhận biết
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    IsProxy,
    HasMint,
    OwnershipNotRenounced,
    LpNotLocked,
    IsHoneypot,
    HasPause,
    HasBlacklist,
    HasWhitelist,
    NotVerified,
    HighTax,
    HasHiddenFees,
    HasTradingCooldown,
    HasMaxTxLimit,
    OwnershipBackdoor,
}

impl Indicator {
    pub const ALL: [Indicator; 14] = [
        Indicator::IsProxy,
        Indicator::HasMint,
        Indicator::OwnershipNotRenounced,
        Indicator::LpNotLocked,
        Indicator::IsHoneypot,
        Indicator::HasPause,
        Indicator::HasBlacklist,
        Indicator::HasWhitelist,
        Indicator::NotVerified,
        Indicator::HighTax,
        Indicator::HasHiddenFees,
        Indicator::HasTradingCooldown,
        Indicator::HasMaxTxLimit,
        Indicator::OwnershipBackdoor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::IsProxy => "is_proxy",
            Indicator::HasMint => "has_mint",
            Indicator::OwnershipNotRenounced => "ownership_not_renounced",
            Indicator::LpNotLocked => "lp_not_locked",
            Indicator::IsHoneypot => "is_honeypot",
            Indicator::HasPause => "has_pause",
            Indicator::HasBlacklist => "has_blacklist",
            Indicator::HasWhitelist => "has_whitelist",
            Indicator::NotVerified => "not_verified",
            Indicator::HighTax => "high_tax",
            Indicator::HasHiddenFees => "has_hidden_fees",
            Indicator::HasTradingCooldown => "has_trading_cooldown",
            Indicator::HasMaxTxLimit => "has_max_tx_limit",
            Indicator::OwnershipBackdoor => "ownership_backdoor",
        }
    }

    /// Tra tên indicator, `None` nếu engine không biết tên này
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|indicator| indicator.as_str() == name)
    }

    /// Giá trị của indicator trên một `ContractAnalysis`
    pub fn evaluate(&self, analysis: &ContractAnalysis) -> bool {
        match self {
            Indicator::IsProxy => analysis.is_proxy,
            Indicator::HasMint => analysis.has_mint_function,
            Indicator::OwnershipNotRenounced => !analysis.ownership_renounced,
            Indicator::LpNotLocked => !analysis.lp_locked,
            Indicator::IsHoneypot => analysis.has_honeypot,
            Indicator::HasPause => analysis.has_pause_function,
            Indicator::HasBlacklist => analysis.has_blacklist,
            Indicator::HasWhitelist => analysis.has_whitelist,
            Indicator::NotVerified => !analysis.verified,
            Indicator::HighTax => analysis.has_high_tax(),
            Indicator::HasHiddenFees => analysis.has_hidden_fees,
            Indicator::HasTradingCooldown => analysis.has_trading_cooldown,
            Indicator::HasMaxTxLimit => analysis.has_max_tx_limit,
            Indicator::OwnershipBackdoor => analysis.has_ownership_backdoor,
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bốn pattern mặc định.
///
/// Indicator chỉ đọc được từ `ContractAnalysis`, nên mỗi pattern khớp trên quyền
/// hạn của contract chứ không trên dữ liệu holder hay thanh khoản thật:
/// - "Top-holder concentration": owner chưa renounce hoặc còn hàm mint, tức là
///   owner vẫn có thể dồn cung về ví mình
/// - "Unlocked liquidity with high cap": `lp_not_locked`, luôn đúng khi chưa có
///   `LpLockOracle`
///
/// Vì vậy hầu hết contract chưa renounce đều nhận ít nhất một flag HIGH từ registry.
pub fn default_patterns() -> Vec<ScamPattern> {
    vec![
        ScamPattern::new(
            "Honeypot",
            "Honeypot: token can be bought but not sold",
            &["is_honeypot"],
            IssueSeverity::Critical,
            FlagCategory::Contract,
        ),
        ScamPattern::new(
            "Hidden mint in proxy",
            "Upgradeable proxy may hide a mint function",
            &["is_proxy", "has_mint"],
            IssueSeverity::Critical,
            FlagCategory::Contract,
        ),
        ScamPattern::new(
            "Top-holder concentration",
            "Owner keeps control over supply distribution",
            &["ownership_not_renounced", "has_mint"],
            IssueSeverity::High,
            FlagCategory::Tokenomics,
        ),
        ScamPattern::new(
            "Unlocked liquidity with high cap",
            "Liquidity is not locked and can be pulled",
            &["lp_not_locked"],
            IssueSeverity::High,
            FlagCategory::Liquidity,
        ),
    ]
}

/// Tên indicator mà engine không nhận biết, theo pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorDrift {
    pub pattern_type: String,
    pub indicator: String,
}

/// Snapshot chỉ đọc của các scam pattern
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternRegistry {
    patterns: Vec<ScamPattern>,
}

impl PatternRegistry {
    /// Registry rỗng
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry với bốn pattern mặc định
    pub fn with_defaults() -> Self {
        Self::from_patterns(default_patterns())
    }

    pub fn from_patterns(patterns: Vec<ScamPattern>) -> Self {
        let registry = Self { patterns };
        for drift in registry.drift() {
            warn!(
                "Pattern '{}' dùng indicator không xác định '{}', bỏ qua",
                drift.pattern_type, drift.indicator
            );
        }
        registry
    }

    /// Load snapshot từ store. Store lỗi thì trả về registry rỗng.
    pub async fn load(store: &dyn PatternStore) -> Self {
        match store.list_patterns().await {
            Ok(patterns) => {
                info!("Đã load {} scam pattern", patterns.len());
                Self::from_patterns(patterns)
            }
            Err(e) => {
                warn!("Không load được pattern registry, đánh giá không có pattern: {}", e);
                Self::empty()
            }
        }
    }

    pub fn patterns(&self) -> &[ScamPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Các tên indicator không nhận biết được
    pub fn drift(&self) -> Vec<IndicatorDrift> {
        self.patterns
            .iter()
            .flat_map(|pattern| {
                pattern
                    .indicators
                    .iter()
                    .filter(|name| Indicator::from_name(name).is_none())
                    .map(move |name| IndicatorDrift {
                        pattern_type: pattern.pattern_type.clone(),
                        indicator: name.clone(),
                    })
            })
            .collect()
    }

    /// Đối chiếu mọi pattern với analysis.
    ///
    /// Một pattern khớp khi có ít nhất một indicator đúng và sinh đúng một flag,
    /// evidence là tên các indicator khớp nối bằng `", "`.
    pub fn match_flags(&self, analysis: &ContractAnalysis) -> Vec<RedFlag> {
        self.patterns
            .iter()
            .filter_map(|pattern| {
                let matched: Vec<&str> = pattern
                    .indicators
                    .iter()
                    .filter_map(|name| Indicator::from_name(name))
                    .filter(|indicator| indicator.evaluate(analysis))
                    .map(|indicator| indicator.as_str())
                    .collect();

                if matched.is_empty() {
                    return None;
                }

                debug!("Pattern '{}' khớp: {}", pattern.pattern_type, matched.join(", "));
                Some(
                    RedFlag::new(pattern.severity, pattern.category, pattern.description.clone())
                        .with_evidence(matched.join(", ")),
                )
            })
            .collect()
    }
}

/// Kho lưu scam pattern
#[async_trait]
pub trait PatternStore: Send + Sync {
    /// Liệt kê toàn bộ pattern
    async fn list_patterns(&self) -> Result<Vec<ScamPattern>>;

    /// Thêm pattern, thay thế pattern cùng `pattern_type`
    async fn upsert_pattern(&self, pattern: ScamPattern) -> Result<()>;
}

fn upsert(patterns: &mut Vec<ScamPattern>, pattern: ScamPattern) {
    match patterns
        .iter_mut()
        .find(|existing| existing.pattern_type == pattern.pattern_type)
    {
        Some(existing) => *existing = pattern,
        None => patterns.push(pattern),
    }
}

/// Store trong bộ nhớ
#[derive(Debug, Default)]
pub struct InMemoryPatternStore {
    patterns: RwLock<Vec<ScamPattern>>,
}

impl InMemoryPatternStore {
    pub fn new(patterns: Vec<ScamPattern>) -> Self {
        Self {
            patterns: RwLock::new(patterns),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_patterns())
    }
}

#[async_trait]
impl PatternStore for InMemoryPatternStore {
    async fn list_patterns(&self) -> Result<Vec<ScamPattern>> {
        Ok(self.patterns.read().await.clone())
    }

    async fn upsert_pattern(&self, pattern: ScamPattern) -> Result<()> {
        upsert(&mut *self.patterns.write().await, pattern);
        Ok(())
    }
}

/// Store dạng file YAML (hoặc JSON nếu đuôi `.json`)
#[derive(Debug, Clone)]
pub struct FilePatternStore {
    path: PathBuf,
}

impl FilePatternStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
    }

    fn parse(&self, content: &str) -> Result<Vec<ScamPattern>> {
        if self.is_json() {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    fn render(&self, patterns: &[ScamPattern]) -> Result<String> {
        if self.is_json() {
            Ok(serde_json::to_string_pretty(patterns)?)
        } else {
            Ok(serde_yaml::to_string(patterns)?)
        }
    }

    /// Ghi đè file bằng danh sách pattern
    pub async fn write_all(&self, patterns: &[ScamPattern]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = self.render(patterns)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl PatternStore for FilePatternStore {
    async fn list_patterns(&self) -> Result<Vec<ScamPattern>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            GuardError::RegistryError(format!("{}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.parse(&content)
    }

    async fn upsert_pattern(&self, pattern: ScamPattern) -> Result<()> {
        let mut patterns = if self.path.exists() {
            self.list_patterns().await?
        } else {
            Vec::new()
        };
        upsert(&mut patterns, pattern);
        self.write_all(&patterns).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn risky_analysis() -> ContractAnalysis {
        ContractAnalysis {
            verified: true,
            is_proxy: true,
            has_mint_function: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_indicator_lookup_table() {
        for indicator in Indicator::ALL {
            assert_eq!(Indicator::from_name(indicator.as_str()), Some(indicator));
        }
        assert_eq!(Indicator::from_name("IS_PROXY"), None);
        assert_eq!(Indicator::from_name("has_rug"), None);
    }

    #[test]
    fn test_negated_indicators() {
        let analysis = ContractAnalysis {
            verified: true,
            ownership_renounced: true,
            lp_locked: true,
            ..Default::default()
        };
        assert!(!Indicator::OwnershipNotRenounced.evaluate(&analysis));
        assert!(!Indicator::LpNotLocked.evaluate(&analysis));
        assert!(!Indicator::NotVerified.evaluate(&analysis));
        assert!(Indicator::LpNotLocked.evaluate(&ContractAnalysis::default()));
    }

    #[test]
    fn test_or_semantics_one_flag_per_pattern() {
        let registry = PatternRegistry::from_patterns(vec![ScamPattern::new(
            "Proxy mint",
            "proxy mint",
            &["is_proxy", "has_mint", "is_honeypot"],
            IssueSeverity::Critical,
            FlagCategory::Contract,
        )]);
        let flags = registry.match_flags(&risky_analysis());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].evidence.as_deref(), Some("is_proxy, has_mint"));
        assert_eq!(flags[0].severity, IssueSeverity::Critical);
    }

    #[test]
    fn test_unknown_indicator_is_drift() {
        let registry = PatternRegistry::from_patterns(vec![ScamPattern::new(
            "Mixed",
            "mixed",
            &["has_rug_pull", "has_mint"],
            IssueSeverity::High,
            FlagCategory::Contract,
        )]);
        assert_eq!(
            registry.drift(),
            vec![IndicatorDrift {
                pattern_type: "Mixed".to_string(),
                indicator: "has_rug_pull".to_string(),
            }]
        );
        // Indicator còn lại vẫn được đánh giá
        let flags = registry.match_flags(&risky_analysis());
        assert_eq!(flags[0].evidence.as_deref(), Some("has_mint"));
        assert!(PatternRegistry::with_defaults().drift().is_empty());
    }

    #[test]
    fn test_default_patterns_match_owner_privileges() {
        let registry = PatternRegistry::with_defaults();
        let active_owner = ContractAnalysis {
            verified: true,
            lp_locked: true,
            ..Default::default()
        };
        let flags = registry.match_flags(&active_owner);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].category, FlagCategory::Tokenomics);
        assert_eq!(flags[0].evidence.as_deref(), Some("ownership_not_renounced"));

        let renounced = ContractAnalysis { ownership_renounced: true, ..active_owner };
        assert!(registry.match_flags(&renounced).is_empty());
    }

    #[test]
    fn test_pattern_category_defaults_to_contract() {
        let yaml = "- pattern_type: Legacy\n  description: legacy\n  indicators: [is_proxy]\n  severity: MEDIUM\n";
        let patterns: Vec<ScamPattern> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(patterns[0].category, FlagCategory::Contract);
        assert_eq!(patterns[0].severity, IssueSeverity::Medium);
    }

    #[tokio::test]
    async fn test_in_memory_store_upsert() {
        let store = InMemoryPatternStore::with_defaults();
        let mut replaced = default_patterns()[0].clone();
        replaced.severity = IssueSeverity::High;
        store.upsert_pattern(replaced).await.unwrap();

        let patterns = store.list_patterns().await.unwrap();
        assert_eq!(patterns.len(), 4);
        assert_eq!(patterns[0].severity, IssueSeverity::High);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip_and_missing_file() {
        let dir = tempdir().unwrap();
        let store = FilePatternStore::new(dir.path().join("patterns.yaml"));

        let registry = PatternRegistry::load(&store).await;
        assert!(registry.is_empty());

        store.write_all(&default_patterns()).await.unwrap();
        let registry = PatternRegistry::load(&store).await;
        assert_eq!(registry.patterns(), default_patterns().as_slice());

        let json_store = FilePatternStore::new(dir.path().join("patterns.json"));
        json_store.upsert_pattern(default_patterns()[1].clone()).await.unwrap();
        assert_eq!(json_store.list_patterns().await.unwrap().len(), 1);
    }
}
