use dotenvy::dotenv;
use service::{MaintenanceModeService, StorageProviderFactory};
use std::process::ExitCode;
use tracing::{error, info};
use uuid::Uuid;

const USAGE: &str = "usage: maintenance <status | mode on|off | freeze on|off>";

enum Command {
    Status,
    Mode(bool),
    Freeze(bool),
}

fn parse_args(args: &[String]) -> Option<Command> {
    let switch = |v: &str| match v {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    };
    match args {
        [cmd] if cmd == "status" => Some(Command::Status),
        [] => Some(Command::Status),
        [cmd, value] if cmd == "mode" => switch(value).map(Command::Mode),
        [cmd, value] if cmd == "freeze" => switch(value).map(Command::Freeze),
        _ => None,
    }
}

fn init_logging() {
    // .env first so RUST_LOG / LOG_FORMAT from it take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    let factory = StorageProviderFactory::from_config(&cfg).await?;
    let service = MaintenanceModeService::load(cfg.maintenance.clone(), factory).await;

    match command {
        Command::Status => {}
        Command::Mode(on) => service.toggle_maintenance_mode(on).await?,
        Command::Freeze(on) => service.toggle_content_freeze(on).await?,
    }

    let status = service.status().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let run_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "maintenance", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().worker_threads(2).enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "maintenance", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "maintenance", event = "start", %run_id, version = env!("CARGO_PKG_VERSION"), "maintenance cli starting");
    match rt.block_on(run(command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "maintenance", event = "run_failed", %run_id, error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
