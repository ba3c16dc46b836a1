//! CLI command implementations

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::rest_api::DataHandler;
use crate::store::{InMemoryStorage, PostgrestStorage, StorageClient};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Build the storage client named by the configuration
pub fn build_storage(config: &StorageConfig) -> CliResult<Arc<dyn StorageClient>> {
    let storage: Arc<dyn StorageClient> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryStorage::new()),
        StorageBackend::Postgrest => Arc::new(PostgrestStorage::new(&config.url, &config.api_key)?),
    };
    Ok(storage)
}

/// Load configuration, wire storage into the handler, and serve
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logging(&config.logging);
    tracing::info!(
        config = %config_path.display(),
        backend = ?config.storage.backend,
        table = %config.storage.table,
        "starting datagate"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let storage = build_storage(&config.storage)?;
        let handler = DataHandler::new(storage, config.storage.table.clone());
        HttpServer::new(config.server.clone(), handler).start().await?;
        Ok::<(), CliError>(())
    })
}

/// Print the resolved configuration with secrets masked
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    let rendered = serde_json::to_string_pretty(&config.redacted())?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_memory_storage() {
        assert!(build_storage(&StorageConfig::default()).is_ok());
    }

    #[test]
    fn test_build_postgrest_storage() {
        let config = StorageConfig {
            backend: StorageBackend::Postgrest,
            url: "https://example.supabase.co".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(build_storage(&config).is_ok());
    }

    #[test]
    fn test_check_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datagate.json");
        std::fs::write(&path, r#"{"storage": {"table": ""}}"#).unwrap();

        assert!(check_config(&path).is_err());
    }
}
