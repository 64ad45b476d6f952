pub mod paths;

use std::{fs, io, path::Path, sync::Once};

static TRACING_INIT: Once = Once::new();

pub const DEFAULT_LOG_FILTER: &str = "bucket_budget=warn";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `fallback`. Output goes to stderr so it
/// never interleaves with command reports on stdout.
pub fn init_tracing(fallback: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(fallback.unwrap_or(DEFAULT_LOG_FILTER))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
        });

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
}
