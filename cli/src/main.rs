mod commands;
mod terminal;

use std::path::{Path, PathBuf};

use commands::{CommandLine, Commands, DEFAULT_LOG_DIR, clear_logs, scan, serve};
use scanport_common::config::ScanConfig;
use terminal::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    // Log cleanup must not open a fresh log file of its own.
    let file_log_dir: Option<&Path> = match commands.command {
        Commands::ClearLogs { .. } => None,
        _ => commands.log_dir.as_deref(),
    };
    if let Some(path) = logging::init_logging(commands.verbose, file_log_dir)? {
        info!("Writing logs to {}", path.display());
    }

    match commands.command {
        Commands::Serve => {
            let cfg = load_config(&commands.config)?;
            if let Err(e) = serve::serve(cfg).await {
                error!("{e}");
                return Err(e.into());
            }
            Ok(())
        }
        Commands::Scan {
            ref host,
            ref begin_port,
            ref end_port,
        } => {
            let cfg = load_config(&commands.config)?;
            scan::scan(host, begin_port, end_port, &cfg).await
        }
        Commands::ClearLogs { ref dir, yes } => {
            let dir: PathBuf = dir
                .clone()
                .or_else(|| commands.log_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
            clear_logs::clear_logs(&dir, yes)
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<ScanConfig> {
    ScanConfig::load(path).map_err(|e| {
        error!("{e}");
        e.into()
    })
}
