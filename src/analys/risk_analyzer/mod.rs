//! Module risk_analyzer
//!
//! Đánh giá rủi ro scam của một dự án:
//! - Thu thập red flag từ contract, tokenomics, team, community và scam pattern
//! - Chấm điểm 5 chiều và điểm tổng hợp 0-100
//! - Đưa ra khuyến nghị AVOID / HIGH_RISK / MODERATE_RISK / LOW_RISK / SAFE

mod analyzer;
mod patterns;
mod scoring;
mod types;

pub use analyzer::{community_red_flags, team_red_flags, tokenomics_red_flags, RiskAnalyzer};

pub use patterns::{
    default_patterns, FilePatternStore, InMemoryPatternStore, Indicator, IndicatorDrift,
    PatternRegistry, PatternStore, ScamPattern,
};

pub use scoring::{
    community_health, composite, contract_safety, liquidity_risk, recommend, render_warnings,
    team_credibility, tokenomics_score, COMMUNITY_WEIGHT, CONTRACT_WEIGHT, LIQUIDITY_WEIGHT,
    NEUTRAL_SCORE, TEAM_WEIGHT, TOKENOMICS_WEIGHT,
};

pub use types::{
    AssessmentInput, CommunityAnalysis, HolderInfo, ProjectData, Recommendation, RiskScore,
    TeamAnalysis, TeamMember, TokenomicsAnalysis,
};
