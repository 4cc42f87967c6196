use clap::Parser;
use series_stats::utils::error::exit_with;
use series_stats::utils::{logger, validation::Validate};
use series_stats::{CliConfig, LocalStorage, StatsEngine, StatsPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, None);

    tracing::info!("Starting series-stats CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let source = match config.source_spec().and_then(|spec| spec.build()) {
        Ok(source) => source,
        Err(e) => exit_with(&e),
    };

    let print_report = config.print;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StatsPipeline::new(storage, config, source);
    let engine = StatsEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Statistics report completed successfully!");
            println!("📁 Report saved to: {}", output_path);

            if print_report {
                let report = std::fs::read_to_string(&output_path)?;
                println!("{}", report);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
