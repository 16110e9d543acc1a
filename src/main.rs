use anyhow::Context;
use clap::Parser;
use group_split::utils::error::{ErrorSeverity, GroupSplitError};
use group_split::utils::{logger, validation::Validate};
use group_split::{
    CliConfig, ConsoleReporter, FileReporter, LocalStorage, Reporter, RosterProvider,
    SplitRunner, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting group-split");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = cli.load_roster().with_context(|| match &cli.config {
        Some(path) => format!("failed to load roster file '{}'", path),
        None => "failed to load roster".to_string(),
    })?;
    cli.apply_overrides(&mut config)
        .context("invalid command line override")?;

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::info!("✅ Roster '{}' loaded and validated", config.roster_name());
    display_config_summary(&config, &cli);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no split will be performed");
        return Ok(());
    }

    let result = match config.output_path() {
        Some(path) => {
            let storage = LocalStorage::new(path.to_string());
            let reporter = FileReporter::new(storage, config.formats(), config.timestamp_format());
            run(reporter, &config)
        }
        None => {
            let reporter = ConsoleReporter::new(config.formats(), config.timestamp_format());
            run(reporter, &config)
        }
    };

    match result {
        Ok(outputs) => {
            tracing::info!("✅ Group split completed successfully!");
            for output in outputs.iter().filter(|o| o.as_str() != "stdout") {
                println!("📁 Report saved to: {}", output);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn run<P: Reporter>(reporter: P, config: &TomlConfig) -> group_split::Result<Vec<String>> {
    let runner = SplitRunner::new(reporter);
    // 設定已在上方驗證過，這裡不重複檢查
    let runner = runner.without_validation();
    let (_, outputs) = runner.run(config)?;
    Ok(outputs)
}

fn exit_with(e: &GroupSplitError) -> ! {
    tracing::error!(
        "❌ Group split failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &TomlConfig, cli: &CliConfig) {
    println!("📋 Configuration Summary:");
    println!("  Roster: {}", config.roster_name());
    println!("  Participants: {}", config.participants().len());
    println!("  Groups: {}", config.group_names().join(", "));
    println!("  Pinned groups: {}", config.priors().len());
    match config.seed() {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }
    let formats: Vec<String> = config.formats().iter().map(|f| f.to_string()).collect();
    println!("  Formats: {}", formats.join(", "));
    println!("  Output: {}", config.output_path().unwrap_or("stdout"));

    if cli.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
