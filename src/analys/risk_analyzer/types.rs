//! Kiểu dữ liệu đầu vào/đầu ra của risk analyzer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analys::token_status::{ContractAnalysis, IssueSeverity, RedFlag};

/// Danh tính dự án được đánh giá
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    pub symbol: String,
    pub contract_address: String,
    /// Tên chain, ví dụ "bsc", "ethereum"
    #[serde(default)]
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Một holder trong danh sách top holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderInfo {
    pub address: String,
    pub balance: f64,
    /// Phần trăm tổng cung, 0-100
    pub percentage: f64,
}

/// Phân bổ cung và holder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenomicsAnalysis {
    pub total_supply: f64,
    pub circulating_supply: f64,
    /// Sắp xếp giảm dần theo balance
    pub top_holders: Vec<HolderInfo>,
    pub holder_count: u64,
    pub market_cap: f64,
    /// Giá trị LP, cùng đơn vị với `market_cap`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lp_tokens: Option<f64>,
}

impl TokenomicsAnalysis {
    /// Tổng phần trăm nắm giữ của 10 holder lớn nhất
    pub fn top10_percentage(&self) -> f64 {
        self.top_holders.iter().take(10).map(|holder| holder.percentage).sum()
    }

    /// Tỷ lệ LP / market cap, chỉ có khi market cap > 0 và có dữ liệu LP
    pub fn lp_ratio(&self) -> Option<f64> {
        match self.lp_tokens {
            Some(lp) if self.market_cap > 0.0 => Some(lp / self.market_cap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

/// Độ minh bạch của team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub is_doxxed: bool,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    #[serde(default)]
    pub previous_projects: Vec<String>,
    #[serde(default)]
    pub scam_history: bool,
}

/// Sức khỏe cộng đồng
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityAnalysis {
    pub twitter_followers: u64,
    pub twitter_engagement: f64,
    pub holder_growth_rate: f64,
    /// -1..1
    pub sentiment_score: f64,
    /// 0-100
    pub bot_activity: f64,
}

/// Một yêu cầu đánh giá đầy đủ. Chỉ `contract` là bắt buộc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub project: ProjectData,
    pub contract: ContractAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenomics: Option<TokenomicsAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<CommunityAnalysis>,
}

impl AssessmentInput {
    pub fn new(project: ProjectData, contract: ContractAnalysis) -> Self {
        Self {
            project,
            contract,
            ..Default::default()
        }
    }

    pub fn with_tokenomics(mut self, tokenomics: TokenomicsAnalysis) -> Self {
        self.tokenomics = Some(tokenomics);
        self
    }

    pub fn with_team(mut self, team: TeamAnalysis) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_community(mut self, community: CommunityAnalysis) -> Self {
        self.community = Some(community);
        self
    }
}

/// Khuyến nghị cuối cùng
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Avoid,
    HighRisk,
    ModerateRisk,
    LowRisk,
    Safe,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Avoid => "AVOID",
            Recommendation::HighRisk => "HIGH_RISK",
            Recommendation::ModerateRisk => "MODERATE_RISK",
            Recommendation::LowRisk => "LOW_RISK",
            Recommendation::Safe => "SAFE",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kết quả đánh giá. Tạo mới cho mỗi lần gọi, không gộp với kết quả cũ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub project: ProjectData,
    /// 0-100, 0 là tệ nhất
    pub overall: u8,
    pub contract_safety: u8,
    pub tokenomics: u8,
    pub team_credibility: u8,
    pub community_health: u8,
    pub liquidity_risk: u8,
    /// Theo thứ tự thu thập
    pub red_flags: Vec<RedFlag>,
    /// Sắp xếp theo severity, dạng `"[SEVERITY] description"`
    pub warnings: Vec<String>,
    pub recommendation: Recommendation,
    pub analysis_timestamp: DateTime<Utc>,
}

impl RiskScore {
    pub fn is_avoid(&self) -> bool {
        self.recommendation == Recommendation::Avoid
    }

    pub fn has_critical(&self) -> bool {
        self.red_flags
            .iter()
            .any(|flag| flag.severity == IssueSeverity::Critical)
    }
}
