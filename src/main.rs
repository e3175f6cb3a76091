use clap::Parser;
use postboard::utils::error::ErrorSeverity;
use postboard::utils::{logger, validation::Validate};
use postboard::{CliConfig, LocalStorage, SiteConfig, SiteEngine, SiteMeta, StaticSitePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting postboard CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let site = match &config.config {
        Some(path) => {
            let site_config = match SiteConfig::from_file(path).and_then(|c| {
                c.validate()?;
                Ok(c)
            }) {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("❌ Site configuration rejected: {}", e);
                    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(2);
                }
            };
            site_config.site_meta()
        }
        None => SiteMeta::default(),
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = StaticSitePipeline::new(storage, config).with_site(site);

    let engine = SiteEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Site build completed successfully!");
            println!("✅ Site build completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Site build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
