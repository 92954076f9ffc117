use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{self as subscriber_fmt, FmtContext, FormatEvent};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const LOG_FILE_FORMAT: &str = "logfile_%Y-%m-%d_%H-%M.log";
const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Terminal formatter, one status symbol per level.
///
/// Symbols are only colored when the writer accepts ANSI escapes.
pub struct ScanportFormatter;

impl<S, N> FormatEvent<S, N> for ScanportFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let symbol: &str = level_symbol(event.metadata().level());

        if writer.has_ansi_escapes() {
            write!(writer, "{} ", paint_symbol(symbol, event.metadata().level()))?;
        } else {
            write!(writer, "{symbol} ")?;
        }

        write_fields(ctx, writer, event)
    }
}

/// Plain formatter for log files:
/// `[2024-05-01 10:30:00] [scanport_cli::commands::serve] [INFO] > message`.
pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        write!(
            writer,
            "[{}] [{}] [{}] > ",
            Local::now().format(LOG_TIME_FORMAT),
            meta.target(),
            meta.level()
        )?;

        write_fields(ctx, writer, event)
    }
}

fn level_symbol(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[ ]",
        Level::DEBUG => "[?]",
        Level::INFO => "[+]",
        Level::WARN => "[*]",
        Level::ERROR => "[-]",
    }
}

fn paint_symbol(symbol: &str, level: &Level) -> ColoredString {
    match *level {
        Level::TRACE => symbol.dimmed(),
        Level::DEBUG => symbol.blue(),
        Level::INFO => symbol.green().bold(),
        Level::WARN => symbol.yellow().bold(),
        Level::ERROR => symbol.red().bold(),
    }
}

/// Writes the event's fields and terminates the line.
fn write_fields<S, N>(ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    ctx.field_format().format_fields(writer.by_ref(), event)?;
    writeln!(writer)
}

pub fn log_file_name(now: DateTime<Local>) -> String {
    now.format(LOG_FILE_FORMAT).to_string()
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. When `log_dir` is given, a
/// second layer appends to a fresh timestamped file there; its path is
/// returned.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let default_level: &str = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = subscriber_fmt::layer()
        .event_format(ScanportFormatter)
        .with_writer(std::io::stderr);

    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path: PathBuf = dir.join(log_file_name(Local::now()));
            let file: File = File::options().create(true).append(true).open(&path)?;
            let layer = subscriber_fmt::layer()
                .event_format(FileFormatter)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(log_path)
}
