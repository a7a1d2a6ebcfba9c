use clap::Parser;
use folio_content::utils::error::{ContentError, ErrorSeverity};
use folio_content::utils::{logger, validation::Validate};
use folio_content::{build_source, AppConfig, CliArgs, FallbackResolver};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting folio-content");

    // 載入並驗證配置；缺少必要設定時在啟動階段就失敗
    let config = match load_and_validate(&args) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    let source = match build_source(&config) {
        Ok(source) => source,
        Err(e) => exit_with(e),
    };
    let resolver = FallbackResolver::with_settings(source, config.resolver.settings());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, abandoning network requests");
            on_interrupt.cancel();
        }
    });

    let output = if args.all_sections {
        let all = resolver.resolve_all_sections(&cancel).await;
        serde_json::to_string_pretty(&all)?
    } else {
        let resolution = resolver.resolve_detailed(args.section, &cancel).await;
        tracing::info!(
            "Resolved {} items (tier: {:?})",
            resolution.items.len(),
            resolution.tier
        );
        serde_json::to_string_pretty(&resolution.items)?
    };

    println!("{}", output);
    Ok(())
}

fn load_and_validate(args: &CliArgs) -> folio_content::Result<AppConfig> {
    let config = args.load_config()?;
    config.validate()?;
    Ok(config)
}

fn exit_with(e: ContentError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
