use greeter::config::{AppConfig, ConfigSource};
use greeter::error::StartupError;
use greeter::job::GreetingJob;
use greeter::service::GreetingService;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let (config, source) = match AppConfig::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            init_logging(Level::INFO);
            error!(cause = %e, "load configuration error");
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.log_level().unwrap_or(Level::INFO));
    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "configuration loaded"),
        ConfigSource::Defaults => info!("no config file, using defaults"),
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "greeter stopped with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    let template = config.template()?;
    info!(%template, "greeting template configured");

    let service = Arc::new(GreetingService::new(template));
    let server = greeter::app_server(&config, Arc::clone(&service))?;

    let job = GreetingJob::schedule(&config.job, Arc::clone(&service));

    let result = server.start_with_shutdown(shutdown_signal()).await;

    if let Some(job) = job {
        let runs = job.stop().await;
        info!(runs, "greeting job stopped");
    }
    info!(issued = service.issued(), "greeter stopped");
    Ok(result?)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("ctrl-c received"),
        Err(e) => {
            error!(cause = %e, "can't listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("can't install log subscriber: {e}");
    }
}
