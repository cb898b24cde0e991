use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialise logging. stdout belongs to the launcher protocol, so output
/// goes either to `file` or to stderr.
///
/// With `debug` the level is `debug` and may be overridden through the
/// `RUST_LOG` environment variable. Otherwise only warnings are emitted.
pub fn init(debug: bool, file: Option<&Path>) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_ansi(false);

    let _ = match file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path.file_name().unwrap_or_else(|| path.as_os_str());
            let appender = tracing_appender::rolling::never(dir, name);
            builder.with_writer(appender).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
}

pub fn filter(debug: bool) -> EnvFilter {
    // Without debug logging `RUST_LOG` is ignored so a stray variable in the
    // user's environment cannot make the plugin chatty.
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("warn")
    }
}
