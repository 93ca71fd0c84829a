use std::path::PathBuf;
use std::sync::OnceLock;
use std::{env, fs, panic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Route panics through `tracing` so they land in the same sink as the rest of
/// the run. Installed at most once per process.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();
        let include_backtrace = env_flag("LEAD_LOG_INCLUDE_BACKTRACE");

        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload not string".into());

            tracing::error!(
                application = app_name,
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Where the subscriber writes. Resolved from `LEAD_LOG_DIR`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogSink {
    Stderr,
    DailyFile(PathBuf),
}

impl LogSink {
    fn from_log_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) if !dir.as_os_str().is_empty() => LogSink::DailyFile(dir),
            _ => LogSink::Stderr,
        }
    }

    /// Falls back to stderr when the log directory cannot be created.
    fn into_writer(self, app_name: &str) -> (BoxMakeWriter, bool) {
        let dir = match self {
            LogSink::Stderr => return (BoxMakeWriter::new(std::io::stderr), true),
            LogSink::DailyFile(dir) => dir,
        };

        if let Err(err) = fs::create_dir_all(&dir) {
            eprintln!("failed to create {} ({err}); logging to stderr", dir.display());
            return (BoxMakeWriter::new(std::io::stderr), true);
        }

        let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        (BoxMakeWriter::new(non_blocking), false)
    }
}

/// Initialize the global subscriber. `RUST_LOG` filters (default `info`).
///
/// With `LEAD_LOG_DIR` set, logs go to `<LEAD_LOG_DIR>/<app>.log` rotated
/// daily; otherwise to stderr, leaving stdout free for command output.
pub fn init_tracing_subscriber(app_name: &'static str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let sink = LogSink::from_log_dir(env::var_os("LEAD_LOG_DIR").map(PathBuf::from));
    let (writer, ansi) = sink.into_writer(app_name);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(ansi)
        .with_writer(writer)
        .try_init();
}
