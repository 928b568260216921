//! Log subscriber and OpenTelemetry setup.
//!
//! Human-readable logs go to stderr so command output on stdout stays
//! machine-readable. When an OTLP endpoint is configured, spans are also
//! exported over gRPC.
//!
//! ```rust,ignore
//! use workshop_client::tracing::TracingConfig;
//!
//! let guard = TracingConfig::new()
//!     .with_service_name("workshop-cli")
//!     .init()?;
//! // ...
//! guard.shutdown();
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the OTLP collector endpoint.
pub const ENV_OTLP_ENDPOINT: &str = "WORKSHOP_OTLP_ENDPOINT";

const INSTRUMENTATION_NAME: &str = "workshop-client";

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP gRPC endpoint, e.g. `http://localhost:4317`
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
    pub service_version: String,
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Emit JSON lines instead of the pretty text format
    pub json: bool,
    pub enable_stderr: bool,
    /// Export timeout for the OTLP client
    pub timeout: Duration,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: std::env::var(ENV_OTLP_ENDPOINT)
                .ok()
                .filter(|v| !v.trim().is_empty()),
            service_name: INSTRUMENTATION_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            default_filter: "info".to_string(),
            json: false,
            enable_stderr: true,
            timeout: Duration::from_secs(5),
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_stderr(mut self, enable: bool) -> Self {
        self.enable_stderr = enable;
        self
    }

    /// Install the global subscriber.
    ///
    /// Keep the returned guard alive until exit and call
    /// [`TracingGuard::shutdown`] to flush pending spans.
    ///
    /// # Errors
    /// The OTLP exporter cannot be built, or a global subscriber is
    /// already set.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        use tracing_subscriber::fmt;

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_filter));

        let provider = match self.otlp_endpoint.as_deref() {
            Some(endpoint) => Some(self.create_tracer_provider(endpoint)?),
            None => None,
        };

        let otel_layer = provider.as_ref().map(|p| {
            tracing_opentelemetry::layer().with_tracer(p.tracer(INSTRUMENTATION_NAME))
        });
        let text_layer = (self.enable_stderr && !self.json)
            .then(|| fmt::layer().with_writer(std::io::stderr));
        let json_layer = (self.enable_stderr && self.json)
            .then(|| fmt::layer().json().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(otel_layer)
            .with(text_layer)
            .with(json_layer)
            .try_init()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        Ok(TracingGuard { provider })
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};
        use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler};

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .build()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new("service.name", self.service_name.clone()),
                opentelemetry::KeyValue::new("service.version", self.service_version.clone()),
            ])
            .build();

        Ok(SdkTracerProvider::builder()
            .with_span_processor(BatchSpanProcessor::builder(exporter).build())
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .build())
    }
}

/// Keeps the tracer provider alive.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Flush and stop span export. No-op without OTLP.
    pub fn shutdown(&self) {
        if let Some(ref provider) = self.provider {
            let _ = provider.shutdown();
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to initialize tracing: {0}")]
    InitError(String),
}

/// Add a W3C `traceparent` header for the current span, if there is one.
pub fn inject_trace_context(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    use opentelemetry::propagation::TextMapPropagator;
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use std::collections::HashMap;
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let context = tracing::Span::current().context();
    let mut headers = HashMap::new();
    TraceContextPropagator::new().inject_context(&context, &mut headers);

    headers
        .into_iter()
        .fold(builder, |builder, (key, value)| builder.header(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = TracingConfig::new()
            .with_otlp_endpoint("http://localhost:4317")
            .with_service_name("workshop-cli")
            .with_default_filter("debug")
            .with_json(true);

        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
        assert_eq!(config.service_name, "workshop-cli");
        assert_eq!(config.default_filter, "debug");
        assert!(config.json);
    }

    #[test]
    fn test_inject_without_active_span_adds_no_header() {
        let client = reqwest::Client::new();
        let request = inject_trace_context(client.get("http://localhost/x"))
            .build()
            .unwrap();
        assert!(request.headers().get("traceparent").is_none());
    }
}
