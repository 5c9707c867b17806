use std::time::Duration;

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, TextEncoder};

static DISPATCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "call_push_service_dispatches_total",
            "Notifications dispatched by call-push-service, by delivery path",
        ),
        &["path"],
    )
    .expect("failed to create call_push_service_dispatches_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register call_push_service_dispatches_total");
    counter
});

static DISPATCH_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "call_push_service_dispatch_failures_total",
            "Dispatch failures by stage (resolve, auth, provider, ordinary)",
        ),
        &["stage"],
    )
    .expect("failed to create call_push_service_dispatch_failures_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register call_push_service_dispatch_failures_total");
    counter
});

static DISPATCH_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let histogram = HistogramVec::new(
        HistogramOpts::new(
            "call_push_service_dispatch_duration_seconds",
            "Dispatch latency for call-push-service",
        )
        .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["path"],
    )
    .expect("failed to create call_push_service_dispatch_duration_seconds");
    prometheus::default_registry()
        .register(Box::new(histogram.clone()))
        .expect("failed to register call_push_service_dispatch_duration_seconds");
    histogram
});

pub fn observe_dispatch(path: &str, elapsed: Duration) {
    DISPATCHES_TOTAL.with_label_values(&[path]).inc();
    DISPATCH_DURATION_SECONDS
        .with_label_values(&[path])
        .observe(elapsed.as_secs_f64());
}

pub fn observe_dispatch_failure(stage: &str) {
    DISPATCH_FAILURES_TOTAL.with_label_values(&[stage]).inc();
}

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
