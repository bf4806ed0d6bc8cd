use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One short line per event, for terminals.
    #[default]
    Compact,
    /// JSON lines, for build pipelines that collect logs.
    Json,
}

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sprite_equalizer=debug,info"
    } else {
        "sprite_equalizer=info"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // 每個 sprite 一行，不需要 target / 執行緒 / 行號
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_crate_only() {
        assert_eq!(default_directive(false), "sprite_equalizer=info");
        assert_eq!(default_directive(true), "sprite_equalizer=debug,info");
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }
}
