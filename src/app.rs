use std::io;
use std::sync::{Arc, Mutex};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::{DocumentSession, ExtractionUseCase, QueryUseCase};
use crate::domain::error::AppError;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::GeminiClient;
use crate::interfaces::http::{add_log, start_server, HttpState};

fn startup_error(err: AppError) -> io::Error {
    error!(error = %err, "Startup failed");
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Load configuration, build the session and serve the HTTP API until shutdown.
pub async fn run() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    dotenvy::dotenv().ok();
    let config = ConfigService::load().map_err(startup_error)?;

    let extraction = ExtractionUseCase::new(&config.fetch).map_err(startup_error)?;
    let query = QueryUseCase::new(Arc::new(GeminiClient::new()));
    let api_key_preloaded = config.llm.api_key().is_some();
    let session = Arc::new(DocumentSession::new(extraction, query, config.llm));

    let logs = Arc::new(Mutex::new(Vec::new()));
    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "Starting DocuGenius on {}:{} (api key {})",
            config.server.host,
            config.server.port,
            if api_key_preloaded { "preloaded" } else { "not set" }
        ),
    );
    info!(
        host = %config.server.host,
        port = config.server.port,
        export_dir = %config.server.export_dir.display(),
        api_key_preloaded,
        "Starting HTTP server"
    );

    let state = HttpState {
        session,
        logs,
        export_dir: config.server.export_dir,
    };
    start_server(state, &config.server.host, config.server.port)?.await
}
