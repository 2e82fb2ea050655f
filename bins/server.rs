use clap::Parser;
use common::utils::logging::{self, LogFormat};
use configs::{AppConfig, CliOverrides};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "simpleservice", about = "In-memory JSON record service", long_about = None)]
struct Args {
    /// Run as external server (listen on all interfaces)
    #[arg(short, long)]
    external: bool,

    /// Port number to use
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a config.toml; defaults to $CONFIG_PATH or ./config.toml when present
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(cfg: &AppConfig) {
    let filter = cfg
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| logging::default_filter(!cfg.server.external).to_string());
    let format = if cfg.logging.json { LogFormat::Json } else { LogFormat::Compact };
    logging::init_logging(&filter, format);
    info!(service = "simpleservice", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    dotenv().ok();
    let args = Args::parse();

    let cli = CliOverrides { external: args.external, port: args.port };
    let cfg = match AppConfig::resolve(args.config.as_deref(), cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::init_logging_default();
            let msg = format!("{e:#}");
            error!(service = "simpleservice", event = "config_invalid", error = %msg, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "simpleservice",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "simpleservice", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "simpleservice",
        event = "start",
        %service_id,
        pid,
        version,
        external = cfg.server.external,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "record service starting"
    );

    rt.block_on(async move {
        match server::run(&cfg.server).await {
            Ok(()) => {
                info!(service = "simpleservice", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                let msg = format!("{e:#}");
                error!(service = "simpleservice", event = "run_failed", error = %msg, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
