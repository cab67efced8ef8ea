//! Risk Analyzer
//!
//! Tổng hợp red flag từ mọi chiều phân tích, chấm điểm và đưa ra khuyến nghị.
//! Analyzer không giữ trạng thái thay đổi được; registry là snapshot chỉ đọc
//! nên có thể gọi đồng thời cho nhiều contract.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::analys::token_status::{contract_red_flags, FlagCategory, IssueSeverity, RedFlag};
use crate::metric;

use super::patterns::PatternRegistry;
use super::scoring;
use super::types::{AssessmentInput, CommunityAnalysis, RiskScore, TeamAnalysis, TokenomicsAnalysis};

const TOP10_CONCENTRATION_LIMIT: f64 = 50.0;
const SINGLE_HOLDER_LIMIT: f64 = 20.0;
const MIN_HOLDER_COUNT: u64 = 100;
const MIN_LP_RATIO: f64 = 0.05;

const BOT_ACTIVITY_LIMIT: f64 = 50.0;
const FOLLOWERS_FOR_ENGAGEMENT_CHECK: u64 = 1000;
const MIN_ENGAGEMENT: f64 = 0.5;
const NEGATIVE_SENTIMENT: f64 = -0.5;

/// Risk Analyzer
#[derive(Debug, Clone, Default)]
pub struct RiskAnalyzer {
    registry: PatternRegistry,
}

impl RiskAnalyzer {
    /// Tạo mới RiskAnalyzer với một snapshot registry
    pub fn new(registry: PatternRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Đánh giá với thời điểm hiện tại
    pub fn assess(&self, input: &AssessmentInput) -> RiskScore {
        self.assess_at(input, Utc::now())
    }

    /// Đánh giá tại thời điểm `now`. Cùng input, cùng registry, cùng `now` cho
    /// cùng kết quả.
    pub fn assess_at(&self, input: &AssessmentInput, now: DateTime<Utc>) -> RiskScore {
        let red_flags = self.collect_red_flags(input, now);
        let contract = &input.contract;

        let contract_safety = scoring::contract_safety(contract, &red_flags);
        let tokenomics = scoring::tokenomics_score(input.tokenomics.is_some(), &red_flags);
        let team_credibility = scoring::team_credibility(input.team.as_ref(), &red_flags);
        let community_health = scoring::community_health(input.community.as_ref(), &red_flags);
        let liquidity_risk = scoring::liquidity_risk(contract, &red_flags);

        let overall = scoring::composite(
            contract_safety,
            tokenomics,
            team_credibility,
            community_health,
            liquidity_risk,
        );
        let has_critical = red_flags
            .iter()
            .any(|flag| flag.severity == IssueSeverity::Critical);
        let recommendation = scoring::recommend(overall, has_critical);
        let warnings = scoring::render_warnings(&red_flags);

        debug!(
            "Assessed {}: overall={} contract={} tokenomics={} team={} community={} liquidity={} -> {}",
            contract.address,
            overall,
            contract_safety,
            tokenomics,
            team_credibility,
            community_health,
            liquidity_risk,
            recommendation,
        );

        let score = RiskScore {
            project: input.project.clone(),
            overall,
            contract_safety,
            tokenomics,
            team_credibility,
            community_health,
            liquidity_risk,
            red_flags,
            warnings,
            recommendation,
            analysis_timestamp: now,
        };
        metric::record_assessment(&score);
        score
    }

    /// Thu thập red flag theo thứ tự: contract, tokenomics, team, community, pattern
    pub fn collect_red_flags(&self, input: &AssessmentInput, now: DateTime<Utc>) -> Vec<RedFlag> {
        let mut flags = contract_red_flags(&input.contract, now);
        if let Some(tokenomics) = &input.tokenomics {
            flags.extend(tokenomics_red_flags(tokenomics));
        }
        if let Some(team) = &input.team {
            flags.extend(team_red_flags(team));
        }
        if let Some(community) = &input.community {
            flags.extend(community_red_flags(community));
        }
        flags.extend(self.registry.match_flags(&input.contract));
        flags
    }
}

pub fn tokenomics_red_flags(tokenomics: &TokenomicsAnalysis) -> Vec<RedFlag> {
    let mut flags = Vec::new();

    let top10 = tokenomics.top10_percentage();
    if top10 > TOP10_CONCENTRATION_LIMIT {
        flags.push(
            RedFlag::new(
                IssueSeverity::High,
                FlagCategory::Tokenomics,
                "Top 10 holders control more than 50% of supply",
            )
            .with_evidence(format!("top 10 holders: {:.2}%", top10)),
        );
    }

    if let Some(whale) = tokenomics
        .top_holders
        .iter()
        .find(|holder| holder.percentage > SINGLE_HOLDER_LIMIT)
    {
        flags.push(
            RedFlag::new(
                IssueSeverity::High,
                FlagCategory::Tokenomics,
                "Single holder owns more than 20% of supply",
            )
            .with_evidence(format!("{} holds {:.2}%", whale.address, whale.percentage)),
        );
    }

    if tokenomics.holder_count < MIN_HOLDER_COUNT {
        flags.push(
            RedFlag::new(IssueSeverity::Medium, FlagCategory::Tokenomics, "Low holder count")
                .with_evidence(format!("{} holders", tokenomics.holder_count)),
        );
    }

    if let Some(ratio) = tokenomics.lp_ratio() {
        if ratio < MIN_LP_RATIO {
            flags.push(
                RedFlag::new(
                    IssueSeverity::High,
                    FlagCategory::Liquidity,
                    "Liquidity is low relative to market cap",
                )
                .with_evidence(format!("liquidity/market cap: {:.4}", ratio)),
            );
        }
    }

    flags
}

pub fn team_red_flags(team: &TeamAnalysis) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    if !team.is_doxxed {
        flags.push(RedFlag::new(IssueSeverity::Medium, FlagCategory::Team, "Team is anonymous"));
    }
    if team.scam_history {
        flags.push(RedFlag::new(
            IssueSeverity::Critical,
            FlagCategory::Team,
            "Team is linked to previous scams",
        ));
    }
    if team.members.is_empty() {
        flags.push(RedFlag::new(IssueSeverity::High, FlagCategory::Team, "No team members listed"));
    }
    flags
}

pub fn community_red_flags(community: &CommunityAnalysis) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    if community.bot_activity > BOT_ACTIVITY_LIMIT {
        flags.push(
            RedFlag::new(IssueSeverity::High, FlagCategory::Community, "High bot activity")
                .with_evidence(format!("bot activity: {:.0}%", community.bot_activity)),
        );
    }
    if community.twitter_followers > FOLLOWERS_FOR_ENGAGEMENT_CHECK
        && community.twitter_engagement < MIN_ENGAGEMENT
    {
        flags.push(
            RedFlag::new(
                IssueSeverity::Medium,
                FlagCategory::Community,
                "Low engagement for follower count",
            )
            .with_evidence(format!(
                "{} followers, engagement {:.2}",
                community.twitter_followers, community.twitter_engagement
            )),
        );
    }
    if community.sentiment_score < NEGATIVE_SENTIMENT {
        flags.push(RedFlag::new(
            IssueSeverity::Medium,
            FlagCategory::Community,
            "Negative community sentiment",
        ));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analys::risk_analyzer::types::{HolderInfo, ProjectData, Recommendation, TeamMember};
    use crate::analys::token_status::ContractAnalysis;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn clean_contract() -> ContractAnalysis {
        ContractAnalysis {
            address: "0xclean".to_string(),
            verified: true,
            ownership_renounced: true,
            lp_locked: true,
            ..Default::default()
        }
    }

    fn holder(address: &str, percentage: f64) -> HolderInfo {
        HolderInfo { address: address.to_string(), balance: percentage, percentage }
    }

    #[test]
    fn test_tokenomics_flags() {
        let tokenomics = TokenomicsAnalysis {
            top_holders: vec![holder("0xwhale", 35.0), holder("0xb", 20.0)],
            holder_count: 40,
            market_cap: 100_000.0,
            lp_tokens: Some(1_000.0),
            ..Default::default()
        };
        let flags = tokenomics_red_flags(&tokenomics);
        assert_eq!(flags.len(), 4);
        assert_eq!(flags[1].evidence.as_deref(), Some("0xwhale holds 35.00%"));
        assert_eq!(flags[3].category, FlagCategory::Liquidity);
    }

    #[test]
    fn test_lp_ratio_needs_market_cap() {
        let tokenomics = TokenomicsAnalysis {
            holder_count: 5_000,
            market_cap: 0.0,
            lp_tokens: Some(0.0),
            ..Default::default()
        };
        assert!(tokenomics_red_flags(&tokenomics).is_empty());
    }

    #[test]
    fn test_team_flags() {
        let flags = team_red_flags(&TeamAnalysis::default());
        assert_eq!(flags.len(), 2);

        let scammers = TeamAnalysis {
            is_doxxed: true,
            members: vec![TeamMember { name: "dev".to_string(), role: "CTO".to_string(), profile_url: None }],
            previous_projects: vec![],
            scam_history: true,
        };
        let flags = team_red_flags(&scammers);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, IssueSeverity::Critical);
    }

    #[test]
    fn test_community_flags() {
        let community = CommunityAnalysis {
            twitter_followers: 50_000,
            twitter_engagement: 0.1,
            holder_growth_rate: 0.0,
            sentiment_score: -0.9,
            bot_activity: 80.0,
        };
        let flags = community_red_flags(&community);
        let severities: Vec<IssueSeverity> = flags.iter().map(|flag| flag.severity).collect();
        assert_eq!(severities, vec![IssueSeverity::High, IssueSeverity::Medium, IssueSeverity::Medium]);
    }

    #[test]
    fn test_clean_token_is_moderate_with_neutral_defaults() {
        let analyzer = RiskAnalyzer::new(PatternRegistry::with_defaults());
        let input = AssessmentInput::new(ProjectData::default(), clean_contract());
        let score = analyzer.assess_at(&input, now());

        assert!(score.red_flags.is_empty());
        assert_eq!(score.contract_safety, 100);
        assert_eq!(score.liquidity_risk, 80);
        assert_eq!(score.overall, 68);
        assert_eq!(score.recommendation, Recommendation::ModerateRisk);
        assert_eq!(score.analysis_timestamp, now());
    }

    #[test]
    fn test_pattern_flags_come_last() {
        let analyzer = RiskAnalyzer::new(PatternRegistry::with_defaults());
        let contract = ContractAnalysis { lp_locked: false, ..clean_contract() };
        let input = AssessmentInput::new(ProjectData::default(), contract);
        let flags = analyzer.collect_red_flags(&input, now());

        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].description, "Liquidity is not locked and can be pulled");
        assert_eq!(flags[0].evidence.as_deref(), Some("lp_not_locked"));
    }
}
