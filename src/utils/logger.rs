use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "lifu_records=debug,warn"
    } else {
        "lifu_records=info,warn"
    }
}

/// Installs the global subscriber. `json` switches from the compact
/// human-readable lines to one JSON object per event.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let json_layer = json.then(|| fmt::layer().json().with_target(false));
    let text_layer = (!json).then(|| {
        fmt::layer()
            .compact()
            .with_target(verbose)
            .without_time()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_follow_verbosity() {
        assert!(default_directives(true).starts_with("lifu_records=debug"));
        assert!(default_directives(false).starts_with("lifu_records=info"));
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
        assert!(EnvFilter::try_new(default_directives(false)).is_ok());
    }
}
