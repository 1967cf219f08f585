use clap::Parser;
use member_import::config::cli::LogFormat;
use member_import::utils::logger;
use member_import::{CliConfig, ImportEngine};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting member-import");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 組合設定；缺少 BaseURL 時直接結束
    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration not complete: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match ImportEngine::new(&config).run().await {
        Ok(report) => {
            println!("✅ Import completed: {}", report.summary);
            println!("📁 Report saved to: {}", report.report_path.display());
        }
        Err(e) => {
            tracing::error!("❌ Fatal error: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
