use anyhow::Context;
use clap::Parser;
use state_patcher::domain::ports::Formatter;
use state_patcher::utils::{logger, validation::Validate};
use state_patcher::{
    CliConfig, LocalStorage, PassthroughFormatter, PatchEngine, PatchError, PatchRequest,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(err) = run(&config).await {
        match err.downcast_ref::<PatchError>() {
            Some(e) => {
                tracing::debug!(kind = ?e.kind(), "patch failed");
                eprintln!("{}", e.user_report());
                std::process::exit(e.exit_code());
            }
            None => {
                eprintln!("❌ {:#}", err);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> anyhow::Result<()> {
    config.validate()?;

    let file_config = config.config.as_ref().map(TomlConfig::from_file).transpose()?;
    let request = config.to_request(file_config.as_ref());
    tracing::info!(
        "Registering `{}` under {}",
        request.key,
        request.root.display()
    );

    let storage = LocalStorage::default();
    match file_config.as_ref().and_then(|c| c.format.as_ref()) {
        Some(format) => {
            let engine = PatchEngine::new(storage, format.formatter());
            execute(&engine, &request, config.dry_run).await
        }
        None => {
            let engine = PatchEngine::new(storage, PassthroughFormatter);
            execute(&engine, &request, config.dry_run).await
        }
    }
}

async fn execute<F: Formatter>(
    engine: &PatchEngine<LocalStorage, F>,
    request: &PatchRequest,
    dry_run: bool,
) -> anyhow::Result<()> {
    if dry_run {
        let output = engine.plan(request).await?;
        println!("// stores/initialState.js\n{}", output.initial_state);
        println!("// reducers/index.js\n{}", output.root_reducer);
        return Ok(());
    }

    let report = engine
        .run(request)
        .await
        .with_context(|| format!("registering `{}`", request.key))?;

    for path in &report.written {
        println!("✅ Updated {}", path.display());
    }
    Ok(())
}
