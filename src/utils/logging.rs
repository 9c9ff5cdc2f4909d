use std::fmt::{self, Debug, Display};
use std::path::{Path, PathBuf};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Where a failure record goes when a wrapped operation returns an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
    Console,
    File(PathBuf),
}

pub fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

/// Runs `op` and, if it fails, writes one ERROR record to the sink picked by
/// `mode` before handing the same error back to the caller.
///
/// The sink only lives for the duration of that record, so whatever subscriber
/// the process installed globally is left untouched.
pub fn logged<T, E, F>(operation: &str, mode: &LogMode, op: F) -> Result<T, E>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    op().map_err(|err| {
        record_failure(operation, mode, &err);
        err
    })
}

fn record_failure(operation: &str, mode: &LogMode, err: &dyn Display) {
    match mode {
        LogMode::Console => emit(std::io::stderr, operation, err),
        LogMode::File(path) => match file_appender(path) {
            Ok(appender) => emit(appender, operation, err),
            Err(e) => {
                tracing::warn!(log_file = %path.display(), "log file unavailable: {}", e);
                emit(std::io::stderr, operation, err);
            }
        },
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, tracing_appender::rolling::InitError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
}

/// `<time> - <LEVEL> - <message>`, one record per line.
struct DashedFormat;

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S, N> FormatEvent<S, N> for DashedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = MessageVisitor::default();
        event.record(&mut message);

        SystemTime.format_time(&mut writer)?;
        writeln!(writer, " - {} - {}", event.metadata().level(), message.0)
    }
}

fn emit<W>(writer: W, operation: &str, err: &dyn Display)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(Level::ERROR)
        .event_format(DashedFormat)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(operation, "{}", err);
    });
}
