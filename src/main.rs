use anyhow::Context;
use clap::Parser;
use drawgen::core::presets;
use drawgen::utils::error::ErrorSeverity;
use drawgen::utils::{logger, validation::Validate};
use drawgen::{
    AppConfig, CliConfig, DrawError, DrawingSession, GenerationRequest, HttpPlatform,
    LocalStorage, Readiness,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.list_presets {
        for preset in presets::presets(cli.format) {
            println!("{:<24} {} - {}", preset.slug, preset.title, preset.summary);
        }
        return Ok(());
    }

    let config = match AppConfig::from_cli(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!(
        "Endpoint: {:?}, model: {}, output: {}",
        config.endpoint,
        config.model,
        config.output_path
    );

    let description = match resolve_description(&cli) {
        Ok(description) => description,
        Err(e) => fail(&e),
    };

    let platform = match HttpPlatform::new(
        config.endpoint().context("endpoint was validated")?,
        config.token.clone(),
        config.generation_timeout,
    ) {
        Ok(platform) => platform,
        Err(e) => fail(&e),
    };

    let readiness = Readiness::initialize(Arc::new(platform.clone()), config.readiness_timeout);
    let session = DrawingSession::new(platform, readiness, config.session_config());

    if let Some(user) = session.refresh_user().await {
        tracing::info!("Signed in as {}", user.display_name());
    }

    let result = match session
        .generate(GenerationRequest::new(description, cli.format))
        .await
    {
        Ok(result) => result,
        Err(e) => fail(&e),
    };

    if cli.print {
        println!("{}", result.text);
    }

    if !cli.no_export {
        let artifact = match session.export().await {
            Ok(artifact) => artifact,
            Err(e) => fail(&e),
        };
        let storage = LocalStorage::new(&config.output_path);
        match storage.write_artifact(&artifact).await {
            Ok(path) => {
                tracing::info!("📁 Exported {} ({})", path.display(), artifact.mime_type);
                println!("📁 Exported: {}", path.display());
            }
            Err(e) => fail(&e),
        }
    }

    if cli.save {
        match session.save().await {
            Ok(saved) => println!("✅ Saved to cloud: {}", saved.metadata.name),
            Err(e) => fail(&e),
        }
    }

    Ok(())
}

fn resolve_description(cli: &CliConfig) -> drawgen::Result<String> {
    if let Some(slug) = &cli.preset {
        let preset = presets::find(cli.format, slug).ok_or_else(|| {
            DrawError::InvalidConfigValueError {
                field: "preset".to_string(),
                value: slug.clone(),
                reason: format!("No {} preset with that name", cli.format.label()),
            }
        })?;
        tracing::info!("Using preset '{}'", preset.title);
        return Ok(preset.description.to_string());
    }

    match &cli.description {
        Some(description) if !description.trim().is_empty() => Ok(description.clone()),
        _ => Err(DrawError::EmptyInput),
    }
}

fn fail(e: &DrawError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
