pub mod middleware;

pub use middleware::{MetricsMiddleware, UNMATCHED_ROUTE};

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use actix_web::http::StatusCode;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

use crate::config::AppConfig;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const HTTP_DURATION_BUCKETS: [f64; 8] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0];

/// One finished HTTP exchange as the request metrics label it
#[derive(Clone, Copy, Debug)]
pub struct RequestOutcome<'a> {
    pub method: &'a str,
    /// Route pattern such as `/users/{id}/avatar`, never the raw path
    pub route: &'a str,
    pub status: StatusCode,
    pub elapsed: Duration,
}

/// Keeps `http_requests_in_flight` raised while alive
#[must_use]
pub struct InFlight {
    _private: (),
}

impl Drop for InFlight {
    fn drop(&mut self) {
        gauge!("http_requests_in_flight").decrement(1.0);
    }
}

/// `"2xx"`, `"4xx"` and so on
pub fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

/// Process-wide Prometheus recorder plus the counters this service emits
#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: Arc<PrometheusHandle>,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self::with_config(None)
    }

    /// The first call installs the global recorder; `config` only affects
    /// that first call.
    pub fn with_config(config: Option<&AppConfig>) -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let builder = match Self::builder(config) {
                Ok(builder) => builder,
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid histogram buckets, using exporter defaults");

                    PrometheusBuilder::new()
                }
            };

            let recorder = builder.build_recorder();
            let handle = recorder.handle();

            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!(error = %e, "Metrics recorder already installed");
            }

            Self::describe_metrics();

            handle
        });

        Self {
            prometheus_handle: Arc::new(handle.clone()),
        }
    }

    fn builder(config: Option<&AppConfig>) -> Result<PrometheusBuilder, BuildError> {
        let builder = match config {
            Some(cfg) => PrometheusBuilder::new()
                .add_global_label("service", cfg.app.name.clone())
                .add_global_label("version", cfg.app.version.clone())
                .add_global_label("environment", cfg.app.environment.clone()),
            None => PrometheusBuilder::new(),
        };

        builder.set_buckets_for_metric(
            Matcher::Full("http_requests_duration_seconds".to_string()),
            &HTTP_DURATION_BUCKETS,
        )
    }

    fn describe_metrics() {
        describe_counter!("http_requests_total", "Total number of HTTP requests");
        describe_histogram!(
            "http_requests_duration_seconds",
            "HTTP request duration in seconds"
        );
        describe_gauge!(
            "http_requests_in_flight",
            "Number of HTTP requests currently being processed"
        );
        describe_counter!("auth_login_attempts_total", "Total number of login attempts");
        describe_counter!(
            "auth_rejections_total",
            "Requests refused for a missing, invalid or revoked token"
        );
        describe_counter!("auth_logouts_total", "Total number of revoked sessions");
        describe_counter!("users_signups_total", "Total number of accounts created");
        describe_counter!("users_deletions_total", "Total number of accounts deleted");
        describe_counter!("avatar_uploads_total", "Total number of avatar uploads");
    }

    /// Count and time one finished exchange; 401s also feed the
    /// per-route rejection counter
    pub fn record_http_request(&self, outcome: &RequestOutcome<'_>) {
        let class = status_class(outcome.status);

        counter!(
            "http_requests_total",
            "method" => outcome.method.to_string(),
            "route" => outcome.route.to_string(),
            "status" => outcome.status.as_u16().to_string(),
            "status_class" => class
        )
        .increment(1);

        histogram!(
            "http_requests_duration_seconds",
            "method" => outcome.method.to_string(),
            "route" => outcome.route.to_string(),
            "status_class" => class
        )
        .record(outcome.elapsed.as_secs_f64());

        if outcome.status == StatusCode::UNAUTHORIZED {
            counter!("auth_rejections_total", "route" => outcome.route.to_string()).increment(1);
        }
    }

    /// Raise the in-flight gauge until the returned guard drops
    pub fn in_flight(&self) -> InFlight {
        gauge!("http_requests_in_flight").increment(1.0);

        InFlight { _private: () }
    }

    pub fn record_login_attempt(&self, success: bool) {
        let status = if success { "true" } else { "false" };
        counter!("auth_login_attempts_total", "success" => status).increment(1);
    }

    pub fn record_logout(&self, sessions: u64) {
        counter!("auth_logouts_total").increment(sessions);
    }

    pub fn record_signup(&self) {
        counter!("users_signups_total").increment(1);
    }

    pub fn record_deletion(&self) {
        counter!("users_deletions_total").increment(1);
    }

    pub fn record_avatar_upload(&self, bytes: usize) {
        counter!("avatar_uploads_total").increment(1);
        histogram!("avatar_upload_bytes").record(bytes as f64);
    }

    pub fn render(&self) -> String {
        self.prometheus_handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
