use faultgate_config::LogLevel;
use tracing_subscriber::EnvFilter;

/// Framework namespaces that are never more verbose than `Warning`
const NOISY_TARGETS: &[&str] = &[
    "hyper",
    "h2",
    "tower",
    "tower_http",
    "axum::rejection",
    "reqwest",
    "opentelemetry",
    "opentelemetry_sdk",
];

/// Filter directives for the given threshold
pub(crate) fn directives(minimum: LogLevel) -> String {
    let noisy = minimum.max(LogLevel::Warning).as_directive();

    std::iter::once(minimum.as_directive().to_owned())
        .chain(NOISY_TARGETS.iter().map(|target| format!("{target}={noisy}")))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn env_filter(minimum: LogLevel) -> EnvFilter {
    EnvFilter::try_new(directives(minimum)).unwrap_or_else(|_| EnvFilter::new(minimum.as_directive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noisy_targets_clamped_to_warning() {
        let directives = directives(LogLevel::Debug);

        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("hyper=warn"));
        assert!(directives.contains("axum::rejection=warn"));
    }

    #[test]
    fn stricter_minimum_wins_for_noisy_targets() {
        let directives = directives(LogLevel::Error);

        assert!(directives.starts_with("error,"));
        assert!(directives.contains("tower_http=error"));
        assert!(!directives.contains("=warn"));
    }

    #[test]
    fn fatal_turns_everything_off() {
        let directives = directives(LogLevel::Fatal);

        assert!(directives.starts_with("off,"));
        assert!(directives.contains("hyper=off"));
    }

    #[test]
    fn directives_parse() {
        for level in [
            LogLevel::Verbose,
            LogLevel::Debug,
            LogLevel::Information,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Fatal,
        ] {
            assert!(EnvFilter::try_new(directives(level)).is_ok());
        }
    }
}
