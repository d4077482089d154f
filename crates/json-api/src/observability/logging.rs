//! Tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Dependencies whose `info` output drowns request logs.
const DEPENDENCY_TARGETS: [&str; 9] = [
    "h2",
    "hyper",
    "hyper_util",
    "tonic",
    "opentelemetry",
    "sqlx",
    "redis",
    "deadpool",
    "reqwest",
];

fn filter_directives(config: &LoggingConfig) -> String {
    DEPENDENCY_TARGETS
        .iter()
        .fold(config.log_level.clone(), |mut directives, target| {
            directives.push(',');
            directives.push_str(target);
            directives.push('=');
            directives.push_str(&config.log_dependency_level);
            directives
        })
}

fn fmt_layer(format: LogFormat) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer().with_target(true);

    match format {
        LogFormat::Compact => layer
            .compact()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    }
}

/// Install the global subscriber. `RUST_LOG` in the environment replaces the
/// configured directives entirely.
pub(super) fn init_subscriber(
    config: &LoggingConfig,
    service_name: &str,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_ignored| EnvFilter::new(filter_directives(config)));

    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(service_name.to_string()))
            .boxed()
    });

    tracing_subscriber::registry()
        .with(fmt_layer(config.log_format))
        .with(otel_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependencies_get_their_own_level() {
        let config = LoggingConfig {
            log_level: "shopfront_json=debug,info".to_string(),
            log_dependency_level: "error".to_string(),
            log_format: LogFormat::Json,
        };

        let directives = filter_directives(&config);

        assert!(directives.starts_with("shopfront_json=debug,info,"), "{directives}");
        assert!(directives.contains(",sqlx=error,"), "{directives}");
        assert!(directives.ends_with(",reqwest=error"), "{directives}");
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "directives should parse: {directives}"
        );
    }
}
