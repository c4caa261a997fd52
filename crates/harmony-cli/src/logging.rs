//! Console logging setup.
//!
//! Lines are written to stderr as `LEVEL:\tTARGET\tMESSAGE`.

use std::fmt;

use clap::ValueEnum;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Severity names accepted by `--loglevel`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    /// Nothing here logs above error, so this silences all output.
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Critical => LevelFilter::OFF,
        }
    }
}

/// Process-lifetime logging configuration, built once from the command line.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub level: LogLevel,
}

impl LogConfig {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Must be called at most once per process.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.as_filter().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(TabbedFormat)
        .init();
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

/// `LEVEL:\tTARGET\tMESSAGE` event format.
pub struct TabbedFormat;

impl<S, N> FormatEvent<S, N> for TabbedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(writer, "{}:\t{}\t", level_name(meta.level()), meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture<F: FnOnce()>(level: LogLevel, f: F) -> String {
        let buffer = Capture::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level.as_filter())
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .event_format(TabbedFormat)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_line_format() {
        let out = capture(LogLevel::Info, || tracing::info!("started activity"));
        assert_eq!(out, "INFO:\tharmony::logging::tests\tstarted activity\n");
    }

    #[test]
    fn test_warning_name() {
        let out = capture(LogLevel::Info, || tracing::warn!("careful"));
        assert!(out.starts_with("WARNING:\t"));
    }

    #[test]
    fn test_level_filtering() {
        let out = capture(LogLevel::Error, || {
            tracing::info!("hidden");
            tracing::error!("shown");
        });
        assert_eq!(out, "ERROR:\tharmony::logging::tests\tshown\n");
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Critical.as_filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Error.as_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Warning.as_filter(), LevelFilter::WARN);
    }

    #[test]
    fn test_critical_hides_errors() {
        let out = capture(LogLevel::Critical, || {
            tracing::error!("could not find activity: nonexistent");
        });
        assert!(out.is_empty());
    }

    #[test]
    fn test_critical_silences_unknown_activity() {
        use crate::commands::run_start_activity;
        use crate::testing::FakeHub;
        use harmony_core::types::ActivityRef;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let out = capture(LogLevel::Critical, || {
            let mut hub = FakeHub::new(1);
            let result = runtime.block_on(run_start_activity(
                &mut hub,
                &ActivityRef::new("nonexistent"),
            ));
            assert!(result.is_err());
        });
        assert!(out.is_empty());

        let out = capture(LogLevel::Error, || {
            let mut hub = FakeHub::new(1);
            let _ = runtime.block_on(run_start_activity(
                &mut hub,
                &ActivityRef::new("nonexistent"),
            ));
        });
        assert_eq!(
            out,
            "ERROR:\tharmony::commands::start_activity\tcould not find activity: nonexistent\n"
        );
    }
}
