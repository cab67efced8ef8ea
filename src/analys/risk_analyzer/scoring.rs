//! Chấm điểm theo từng chiều, điểm tổng hợp và khuyến nghị
//!
//! Mỗi điểm con được tính trên số nguyên có dấu rồi giới hạn về `[0, 100]`.
//! Severity không có trong bảng trừ điểm của một chiều thì trừ 0.

use crate::analys::token_status::{ContractAnalysis, FlagCategory, IssueSeverity, RedFlag};

use super::types::{CommunityAnalysis, Recommendation, TeamAnalysis};

/// Điểm trung tính khi thiếu dữ liệu
pub const NEUTRAL_SCORE: u8 = 50;

/// Trọng số theo phần trăm, tổng bằng 100
pub const CONTRACT_WEIGHT: u32 = 30;
pub const TOKENOMICS_WEIGHT: u32 = 25;
pub const TEAM_WEIGHT: u32 = 20;
pub const COMMUNITY_WEIGHT: u32 = 15;
pub const LIQUIDITY_WEIGHT: u32 = 10;

/// Bảng trừ điểm theo severity
#[derive(Debug, Clone, Copy)]
struct DeductionTable {
    critical: i32,
    high: i32,
    medium: i32,
    low: i32,
}

impl DeductionTable {
    fn deduction(&self, severity: IssueSeverity) -> i32 {
        match severity {
            IssueSeverity::Critical => self.critical,
            IssueSeverity::High => self.high,
            IssueSeverity::Medium => self.medium,
            IssueSeverity::Low => self.low,
        }
    }

    /// Tổng điểm trừ của các flag thuộc một nhóm
    fn total(&self, flags: &[RedFlag], category: FlagCategory) -> i32 {
        flags
            .iter()
            .filter(|flag| flag.category == category)
            .map(|flag| self.deduction(flag.severity))
            .sum()
    }
}

const STANDARD: DeductionTable = DeductionTable { critical: 30, high: 20, medium: 10, low: 5 };
const TEAM: DeductionTable = DeductionTable { critical: 40, high: 20, medium: 10, low: 0 };
const COMMUNITY: DeductionTable = DeductionTable { critical: 0, high: 20, medium: 10, low: 0 };
const LIQUIDITY: DeductionTable = DeductionTable { critical: 30, high: 20, medium: 10, low: 0 };

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

fn bonus(condition: bool, points: i32) -> i32 {
    if condition {
        points
    } else {
        0
    }
}

pub fn contract_safety(analysis: &ContractAnalysis, flags: &[RedFlag]) -> u8 {
    let score = 100 - STANDARD.total(flags, FlagCategory::Contract)
        + bonus(analysis.verified, 10)
        + bonus(analysis.ownership_renounced, 10)
        + bonus(analysis.lp_locked, 10);
    clamp_score(score)
}

pub fn tokenomics_score(supplied: bool, flags: &[RedFlag]) -> u8 {
    if !supplied {
        return NEUTRAL_SCORE;
    }
    clamp_score(100 - STANDARD.total(flags, FlagCategory::Tokenomics))
}

pub fn team_credibility(team: Option<&TeamAnalysis>, flags: &[RedFlag]) -> u8 {
    let Some(team) = team else {
        return NEUTRAL_SCORE;
    };
    let score = 50
        + bonus(team.is_doxxed, 30)
        + bonus(!team.members.is_empty(), 10)
        + bonus(!team.previous_projects.is_empty(), 10)
        - TEAM.total(flags, FlagCategory::Team);
    clamp_score(score)
}

pub fn community_health(community: Option<&CommunityAnalysis>, flags: &[RedFlag]) -> u8 {
    let Some(community) = community else {
        return NEUTRAL_SCORE;
    };
    let score = 50
        + bonus(community.holder_growth_rate > 0.0, 10)
        + bonus(community.sentiment_score > 0.5, 10)
        + bonus(community.twitter_engagement > 2.0, 10)
        - COMMUNITY.total(flags, FlagCategory::Community);
    clamp_score(score)
}

pub fn liquidity_risk(analysis: &ContractAnalysis, flags: &[RedFlag]) -> u8 {
    let score = 50 + bonus(analysis.lp_locked, 30) - LIQUIDITY.total(flags, FlagCategory::Liquidity);
    clamp_score(score)
}

/// Điểm tổng hợp có trọng số, làm tròn về số nguyên gần nhất (x.5 làm tròn lên)
pub fn composite(
    contract: u8,
    tokenomics: u8,
    team: u8,
    community: u8,
    liquidity: u8,
) -> u8 {
    let weighted = CONTRACT_WEIGHT * u32::from(contract)
        + TOKENOMICS_WEIGHT * u32::from(tokenomics)
        + TEAM_WEIGHT * u32::from(team)
        + COMMUNITY_WEIGHT * u32::from(community)
        + LIQUIDITY_WEIGHT * u32::from(liquidity);
    ((weighted + 50) / 100).min(100) as u8
}

/// Khuyến nghị theo thứ tự ưu tiên: CRITICAL hoặc < 30 là AVOID
pub fn recommend(overall: u8, has_critical: bool) -> Recommendation {
    if has_critical || overall < 30 {
        Recommendation::Avoid
    } else if overall < 50 {
        Recommendation::HighRisk
    } else if overall < 70 {
        Recommendation::ModerateRisk
    } else if overall < 85 {
        Recommendation::LowRisk
    } else {
        Recommendation::Safe
    }
}

/// Warning sắp xếp ổn định theo severity
pub fn render_warnings(flags: &[RedFlag]) -> Vec<String> {
    let mut sorted: Vec<&RedFlag> = flags.iter().collect();
    sorted.sort_by_key(|flag| flag.severity);
    sorted.into_iter().map(RedFlag::to_warning).collect()
}
