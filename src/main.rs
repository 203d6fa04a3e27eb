use clap::Parser;
use sisagua_fetch::utils::{logger, validation::Validate};
use sisagua_fetch::{CliConfig, FetchEngine, LocalStorage, SisaguaPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sisagua-fetch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let filter = config.filter_set();
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SisaguaPipeline::new(storage, config, filter);
    let engine = FetchEngine::new(pipeline);

    match engine.run().await {
        Ok(Some(output_path)) => {
            println!("✅ Fetch completed");
            println!("📁 CSV saved to: {}", output_path);
        }
        Ok(None) => {
            println!("⚠️ No records found for the selected filters");
        }
        Err(e) => {
            tracing::error!("❌ Fetch failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
