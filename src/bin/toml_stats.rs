use clap::Parser;
use series_stats::config::toml_config::{LogFormat, TomlConfig};
use series_stats::config::SourceSpec;
use series_stats::core::ConfigProvider;
use series_stats::utils::error::exit_with;
use series_stats::utils::{logger, validation::Validate};
use series_stats::{LocalStorage, StatsEngine, StatsPipeline};

#[derive(Parser)]
#[command(name = "toml-stats")]
#[command(about = "Series statistics driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "series-stats.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 日誌格式由配置決定
    match config.log_format() {
        LogFormat::Json => logger::init_json_logger(config.log_level()),
        LogFormat::Compact => logger::init_cli_logger(args.verbose, config.log_level()),
    }

    tracing::info!("🚀 Starting TOML-based series statistics");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(output_path) = &args.output_path {
        config.output.path = output_path.clone();
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let spec = match config.source_spec() {
        Ok(spec) => spec,
        Err(e) => exit_with(&e),
    };

    display_config_summary(&config, &spec);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let source = match spec.build() {
        Ok(source) => source,
        Err(e) => exit_with(&e),
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = StatsPipeline::new(storage, config, source);
    let engine = StatsEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Statistics report completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, spec: &SourceSpec) {
    println!("📋 Configuration Summary:");
    match spec {
        SourceSpec::File { path, format } => {
            let format = format
                .map(|f| format!("{:?}", f))
                .unwrap_or_else(|| "inferred".to_string());
            println!("  Source: file {} (format: {})", path, format);
        }
        SourceSpec::Http {
            endpoint,
            timeout_seconds,
            headers,
        } => {
            println!("  Source: {} (timeout {}s)", endpoint, timeout_seconds);
            if !headers.is_empty() {
                println!("  Headers: {} custom headers", headers.len());
            }
        }
    }
    println!(
        "  Output: {}/{}",
        config.output_path(),
        config.report_filename()
    );
    println!("  Pretty JSON: {}", config.pretty_output());
    println!();
}
