//! Metrics for LLM gateway calls.
//!
//! OpenTelemetry counters and a latency histogram, labelled by provider and model.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for LLM API interactions.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total gateway calls that returned content
    pub requests: Counter<u64>,
    /// Failed gateway calls
    pub errors: Counter<u64>,
    /// Call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("draftsmith_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total LLM gateway calls")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed LLM gateway calls")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("LLM gateway call duration")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
        }
    }

    /// Get the global instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful call.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed call.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record reported token usage.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.tokens_used.add(total_tokens, labels);
    }
}

/// Classify an error for metrics labelling.
///
/// Returns one of: "unavailable", "rate_limit", "auth", "upstream", "empty_response", "unknown".
pub fn classify_error(error: &dyn std::error::Error) -> &'static str {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("unavailable") {
        "unavailable"
    } else if error_str.contains("rate limit") || error_str.contains("http 429") {
        "rate_limit"
    } else if error_str.contains("http 401") || error_str.contains("http 403") {
        "auth"
    } else if error_str.contains("upstream returned http") {
        "upstream"
    } else if error_str.contains("no message content") {
        "empty_response"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftsmith_error::{GatewayError, GatewayErrorKind};

    #[test]
    fn test_classify_gateway_errors() {
        let cases = [
            (GatewayErrorKind::Unavailable("no key".into()), "unavailable"),
            (
                GatewayErrorKind::Http { status: 429, body: String::new() },
                "rate_limit",
            ),
            (
                GatewayErrorKind::Http { status: 401, body: String::new() },
                "auth",
            ),
            (
                GatewayErrorKind::Http { status: 502, body: "bad".into() },
                "upstream",
            ),
            (GatewayErrorKind::EmptyResponse, "empty_response"),
        ];
        for (kind, expected) in cases {
            let err = GatewayError::new(kind);
            assert_eq!(classify_error(&err), expected, "{err}");
        }
    }
}
