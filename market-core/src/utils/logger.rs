use crate::config::LogConfig;
use anyhow::{Context, Result};
use chrono::Local;
use nu_ansi_term::{Color, Style};
use std::fmt;
use tracing::dispatcher::{self, DefaultGuard};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    EnvFilter,
};

/// An explicitly constructed logging pipeline.
///
/// Libraries only emit `tracing` events; the application root builds a
/// `Logger` from its [`LogConfig`] and decides how long it lives, either
/// installing it for the whole process or scoping it to the current thread.
pub struct Logger {
    dispatch: Dispatch,
    guard: Option<WorkerGuard>,
}

/// Keeps the non-blocking file writer flushing. Drop it last.
pub struct LoggerGuard {
    _worker: Option<WorkerGuard>,
}

impl Logger {
    pub fn new(config: &LogConfig) -> Result<Self> {
        let console_filter = build_filter(&config.level)?;
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(config.ansi)
            .event_format(TerminalFormatter { ansi: config.ansi })
            .with_filter(console_filter);

        let (file_layer, guard) = match &config.directory {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir))?;

                let file_appender = tracing_appender::rolling::hourly(dir, &config.file_prefix);
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .event_format(FileFormatter)
                    .with_filter(build_filter(&config.level)?);

                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            guard,
        })
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Routes events from the current thread to this logger until the
    /// returned guard is dropped.
    pub fn scoped(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// Installs this logger for the whole process. Can succeed only once.
    pub fn install_global(self) -> Result<LoggerGuard> {
        dispatcher::set_global_default(self.dispatch)
            .context("Failed to set global subscriber")?;

        Ok(LoggerGuard {
            _worker: self.guard,
        })
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("file_output", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    // RUST_LOG wins over the configured level
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level directive '{}'", level)),
    }
}

// --- Formatters ---

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn render(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}", self.message, fields)
    }
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push((field.name(), format!("{:?}", value)));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }
}

fn level_style(level: &Level) -> Style {
    match *level {
        Level::ERROR => Style::new().fg(Color::LightRed).bold(),
        Level::WARN => Style::new().fg(Color::Yellow).bold(),
        Level::INFO => Style::new().fg(Color::LightGreen),
        Level::DEBUG => Style::new().fg(Color::LightBlue),
        Level::TRACE => Style::new().fg(Color::DarkGray),
    }
}

pub struct TerminalFormatter {
    ansi: bool,
}

impl<S, N> FormatEvent<S, N> for TerminalFormatter
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
        let level = event.metadata().level();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if self.ansi {
            let tag = level_style(level).paint(format!("{:>5}", level));
            write!(writer, "{} {}", tag, visitor.render())?;
        } else {
            write!(writer, "{:>5} {}", level, visitor.render())?;
        }
        writeln!(writer)
    }
}

pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
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
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let metadata = event.metadata();

        write!(
            writer,
            "{} [{}] {}: ",
            timestamp,
            metadata.level(),
            metadata.target()
        )?;

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        writeln!(writer, "{}", visitor.render())
    }
}
