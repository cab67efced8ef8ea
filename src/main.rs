/// DiamondChain ScamGuard - Main entry point
///
/// CLI quét source code contract cục bộ, kiểm tra nhanh và đánh giá rủi ro
/// từ file yêu cầu JSON. Kết quả in ra stdout dạng JSON, log ra stderr.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use scamguard::{
    analys::risk_analyzer::{default_patterns, FilePatternStore},
    config::{initialize_default_config, ConfigManager, GuardConfig},
    greeting, init_logging, metric, AssessmentInput, ContractScanner, ContractSourceProvider,
    LocalSourceProvider, RiskAnalyzer,
};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config/scamguard.yaml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands
#[derive(Subcommand)]
enum Commands {
    /// Generate default configuration and pattern file
    Init,

    /// List scam patterns in the registry
    Patterns,

    /// Scan a contract from the local source directory
    Scan {
        /// Contract address
        address: String,
    },

    /// Quick safety check of a contract
    Check {
        /// Contract address
        address: String,
    },

    /// Full risk assessment from a JSON request file
    Assess {
        /// Path to the assessment request
        request: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;
    info!("{}", greeting());

    let config_manager = Arc::new(ConfigManager::new(&cli.config));

    match cli.command {
        Commands::Init => init_config(config_manager).await?,
        Commands::Patterns => list_patterns(&load_config(&config_manager).await?).await?,
        Commands::Scan { address } => scan_contract(&load_config(&config_manager).await?, &address).await?,
        Commands::Check { address } => check_contract(&load_config(&config_manager).await?, &address).await?,
        Commands::Assess { request } => assess_request(&load_config(&config_manager).await?, &request).await?,
    }

    Ok(())
}

/// Load configuration and start the metrics exporter if enabled
async fn load_config(config_manager: &ConfigManager) -> Result<GuardConfig> {
    config_manager.load().await?;
    let config = config_manager.get_config().await;
    metric::init(config.general.enable_metrics, config.general.metrics_port)?;
    Ok(config)
}

/// Initialize configuration with defaults
async fn init_config(config_manager: Arc<ConfigManager>) -> Result<()> {
    info!("Initializing default configuration at {}", config_manager.config_path);

    let default_config = initialize_default_config();
    if let Some(patterns_file) = &default_config.registry.patterns_file {
        FilePatternStore::new(patterns_file)
            .write_all(&default_patterns())
            .await
            .with_context(|| format!("Failed to write pattern file: {}", patterns_file))?;
        info!("Default scam patterns written to {}", patterns_file);
    }

    config_manager.update_config(default_config).await?;

    info!("Default configuration generated successfully");
    Ok(())
}

async fn list_patterns(config: &GuardConfig) -> Result<()> {
    let registry = config.registry.load_registry().await;
    for drift in registry.drift() {
        warn!("Pattern '{}': unknown indicator '{}'", drift.pattern_type, drift.indicator);
    }
    print_json(registry.patterns())
}

async fn scan_contract(config: &GuardConfig, address: &str) -> Result<()> {
    let provider = LocalSourceProvider::new(&config.scanner.source_dir);
    let source = provider.get_contract_source(address).await?;
    let creation = provider.get_creation_info(address).await.unwrap_or_default();
    print_json(&ContractScanner::new().scan(&source, &creation))
}

async fn check_contract(config: &GuardConfig, address: &str) -> Result<()> {
    let provider = LocalSourceProvider::new(&config.scanner.source_dir);
    let check = ContractScanner::new().quick_safety_check(&provider, address).await?;
    print_json(&check)
}

async fn assess_request(config: &GuardConfig, request: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(request)
        .await
        .with_context(|| format!("Failed to read request file: {}", request))?;
    let input: AssessmentInput =
        serde_json::from_str(&content).context("Failed to parse assessment request")?;

    let analyzer = RiskAnalyzer::new(config.registry.load_registry().await);
    print_json(&analyzer.assess(&input))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}
