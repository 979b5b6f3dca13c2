use std::process::ExitCode;

use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tracing::{error, info};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        error!(event = "panic", pid = std::process::id(), message = %panic, "unhandled panic");
        default_hook(panic);
    }));
}

fn build_runtime(server: &ServerConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env before logging so RUST_LOG and LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    install_panic_hook();

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", path = %configs::config_path(), error = %format!("{e:#}"), "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match build_runtime(&cfg.server) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        threads = ?cfg.server.worker_threads,
        backend = ?cfg.store.backend,
        "phrasebook starting"
    );

    match runtime.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(event = "stop", "phrasebook stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", error = %format!("{e:#}"), "phrasebook exited with error");
            ExitCode::FAILURE
        }
    }
}
