/// Metrics collection and reporting module
///
/// Ghi nhận số lần đánh giá, phân bố điểm và số lần quick check qua facade `metrics`.
/// Khi không có recorder nào được cài, các macro là no-op nên library có thể gọi
/// thoải mái; binary cài Prometheus exporter nếu được bật trong config.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_histogram, histogram, increment_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

use crate::analys::risk_analyzer::RiskScore;
use crate::analys::token_status::SafetyCheck;

const ASSESSMENTS_TOTAL: &str = "scamguard_assessments_total";
const OVERALL_SCORE: &str = "scamguard_overall_score";
const RED_FLAGS_PER_ASSESSMENT: &str = "scamguard_red_flags_per_assessment";
const SAFETY_CHECKS_TOTAL: &str = "scamguard_safety_checks_total";

/// Mô tả các metric cho exporter
fn describe_metrics() {
    describe_counter!(ASSESSMENTS_TOTAL, "Number of risk assessments by recommendation");
    describe_histogram!(OVERALL_SCORE, "Distribution of overall risk scores");
    describe_histogram!(RED_FLAGS_PER_ASSESSMENT, "Red flags raised per assessment");
    describe_counter!(SAFETY_CHECKS_TOTAL, "Number of quick safety checks by outcome");
}

/// Initialize the metrics system
pub fn init(metrics_enabled: bool, metrics_port: u16) -> Result<()> {
    if !metrics_enabled {
        return Ok(());
    }

    let address: SocketAddr = format!("0.0.0.0:{}", metrics_port)
        .parse()
        .context("Invalid metrics address")?;

    PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
        .context("Failed to install Prometheus exporter")?;
    describe_metrics();

    info!("Metrics server started on http://{}/metrics", address);
    Ok(())
}

/// Ghi nhận một lần đánh giá
pub fn record_assessment(score: &RiskScore) {
    increment_counter!(ASSESSMENTS_TOTAL, "recommendation" => score.recommendation.as_str());
    histogram!(OVERALL_SCORE, f64::from(score.overall));
    histogram!(RED_FLAGS_PER_ASSESSMENT, score.red_flags.len() as f64);
}

/// Ghi nhận một lần quick check
pub fn record_safety_check(check: &SafetyCheck) {
    let outcome = if check.is_safe { "safe" } else { "unsafe" };
    increment_counter!(SAFETY_CHECKS_TOTAL, "outcome" => outcome);
}
