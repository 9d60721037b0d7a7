//! Request metrics for the post service, rendered in Prometheus text format.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use posts_core::error::Code;
use posts_core::ports::{Operation, ServiceObserver};

const SUCCESS: &str = "success";
const ERROR: &str = "error";

/// Metric registry for post service requests.
///
/// Owned by whoever builds the service and injected as its observer; the
/// collectors live in a private `Registry`, never the process-wide default.
pub struct PostMetrics {
    registry: Registry,
    requests: IntCounterVec,
    duration: HistogramVec,
    posts_created: IntCounter,
    database_errors: IntCounter,
}

impl PostMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("posts_requests_total", "Total number of post service requests"),
            &["method", "status"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "posts_request_duration_seconds",
                "Duration of post service requests",
            ),
            &["method"],
        )?;
        let posts_created =
            IntCounter::new("posts_created_total", "Total number of created posts")?;
        let database_errors =
            IntCounter::new("posts_database_errors_total", "Total number of database errors")?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(posts_created.clone()))?;
        registry.register(Box::new(database_errors.clone()))?;

        // Expose every method at zero before its first request.
        for op in Operation::ALL {
            requests.with_label_values(&[op.as_str(), SUCCESS]);
            requests.with_label_values(&[op.as_str(), ERROR]);
            duration.with_label_values(&[op.as_str()]);
        }

        Ok(Self {
            registry,
            requests,
            duration,
            posts_created,
            database_errors,
        })
    }

    pub fn successes(&self, op: Operation) -> u64 {
        self.requests.with_label_values(&[op.as_str(), SUCCESS]).get()
    }

    pub fn failures(&self, op: Operation) -> u64 {
        self.requests.with_label_values(&[op.as_str(), ERROR]).get()
    }

    /// Number of latency samples recorded for `op`.
    pub fn observed(&self, op: Operation) -> u64 {
        self.duration.with_label_values(&[op.as_str()]).get_sample_count()
    }

    pub fn posts_created(&self) -> u64 {
        self.posts_created.get()
    }

    pub fn database_errors(&self) -> u64 {
        self.database_errors.get()
    }

    /// Render all collectors in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Content type of [`render`](Self::render) output.
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    fn record(&self, op: Operation, status: &str, elapsed: Duration) {
        self.requests.with_label_values(&[op.as_str(), status]).inc();
        self.duration
            .with_label_values(&[op.as_str()])
            .observe(elapsed.as_secs_f64());
    }
}

impl ServiceObserver for PostMetrics {
    fn on_success(&self, op: Operation, elapsed: Duration) {
        self.record(op, SUCCESS, elapsed);
    }

    fn on_failure(&self, op: Operation, _code: Code, elapsed: Duration) {
        self.record(op, ERROR, elapsed);
    }

    fn on_post_created(&self) {
        self.posts_created.inc();
    }

    fn on_storage_failure(&self, _op: Operation) {
        self.database_errors.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_operation_and_status() {
        let metrics = PostMetrics::new().unwrap();

        metrics.on_success(Operation::CreatePost, Duration::from_millis(2));
        metrics.on_success(Operation::CreatePost, Duration::from_millis(3));
        metrics.on_failure(Operation::GetPost, Code::NotFound, Duration::from_millis(1));

        assert_eq!(metrics.successes(Operation::CreatePost), 2);
        assert_eq!(metrics.failures(Operation::CreatePost), 0);
        assert_eq!(metrics.observed(Operation::CreatePost), 2);

        assert_eq!(metrics.successes(Operation::GetPost), 0);
        assert_eq!(metrics.failures(Operation::GetPost), 1);
        assert_eq!(metrics.observed(Operation::GetPost), 1);
    }

    #[test]
    fn test_render_exposes_all_series() {
        let metrics = PostMetrics::new().unwrap();
        metrics.on_post_created();
        metrics.on_storage_failure(Operation::ListPosts);
        metrics.on_failure(Operation::ListPosts, Code::Internal, Duration::from_millis(1));

        let text = metrics.render().unwrap();

        assert!(text.contains("posts_requests_total{method=\"ListPosts\",status=\"error\"} 1"));
        assert!(text.contains("posts_requests_total{method=\"DeletePost\",status=\"success\"} 0"));
        assert!(text.contains("posts_request_duration_seconds_count{method=\"ListPosts\"} 1"));
        assert!(text.contains("posts_created_total 1"));
        assert!(text.contains("posts_database_errors_total 1"));
    }

    #[test]
    fn test_duration_is_a_bucketed_histogram() {
        let metrics = PostMetrics::new().unwrap();
        metrics.on_success(Operation::GetPost, Duration::from_millis(3));
        metrics.on_success(Operation::GetPost, Duration::from_millis(300));

        let text = metrics.render().unwrap();

        let bucket = |le: &str| {
            format!("posts_request_duration_seconds_bucket{{method=\"GetPost\",le=\"{le}\"}}")
        };

        assert!(text.contains("# TYPE posts_request_duration_seconds histogram"));
        assert!(text.contains(&format!("{} 1", bucket("0.005"))));
        assert!(text.contains(&format!("{} 2", bucket("0.5"))));
        assert!(text.contains(&format!("{} 2", bucket("+Inf"))));
    }

    #[test]
    fn test_registries_are_independent() {
        let first = PostMetrics::new().unwrap();
        let second = PostMetrics::new().unwrap();

        first.on_post_created();

        assert_eq!(first.posts_created(), 1);
        assert_eq!(second.posts_created(), 0);
    }
}
