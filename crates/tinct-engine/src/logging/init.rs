use std::sync::Once;

/// Default filter when neither an explicit filter nor `RUST_LOG` is set.
/// wgpu is chatty at info.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g.
/// `"tinct_engine=debug,wgpu=warn"`. It wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .init();

        log::debug!("logging initialized ({filter})");
    });
}

fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    let given = |f: &String| !f.trim().is_empty();
    explicit
        .filter(given)
        .or_else(|| env.filter(given))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let f = resolve_filter(Some("debug".into()), Some("warn".into()));
        assert_eq!(f, "debug");
    }

    #[test]
    fn env_used_when_no_explicit_filter() {
        assert_eq!(resolve_filter(None, Some("trace".into())), "trace");
    }

    #[test]
    fn blank_falls_back_to_default() {
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(Some("  ".into()), None), DEFAULT_FILTER);
    }

    #[test]
    fn blank_explicit_filter_defers_to_env() {
        let f = resolve_filter(Some("  ".into()), Some("warn".into()));
        assert_eq!(f, "warn");
        assert_eq!(resolve_filter(Some(String::new()), Some(" ".into())), DEFAULT_FILTER);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("error".into()),
            ..Default::default()
        });
    }
}
