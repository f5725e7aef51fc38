//! Feed Metrics
//!
//! Prometheus metrics for feed assembly and engagement writes

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::time::Duration;

static FEED_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_requests_total",
        "Total feed requests by mode and outcome",
        &["mode", "status"]
    )
    .expect("Failed to register feed requests metric")
});

static FEED_RANK_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "feed_rank_duration_seconds",
        "Time spent scoring and sorting a feed snapshot",
        &["mode"],
        vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1]
    )
    .expect("Failed to register feed rank duration metric")
});

static FEED_CANDIDATES: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "feed_candidates",
        "Number of items ranked per feed request",
        &["mode"],
        vec![0.0, 1.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0]
    )
    .expect("Failed to register feed candidates metric")
});

static ENGAGEMENT_ACTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "engagement_actions_total",
        "Total engagement actions applied to content",
        &["action"]
    )
    .expect("Failed to register engagement actions metric")
});

/// Record a served or failed feed request
pub fn record_feed_request(mode: &str, status: &str) {
    FEED_REQUESTS_TOTAL.with_label_values(&[mode, status]).inc();
}

pub fn record_rank_duration(mode: &str, duration: Duration) {
    FEED_RANK_DURATION_SECONDS
        .with_label_values(&[mode])
        .observe(duration.as_secs_f64());
}

pub fn record_candidates(mode: &str, count: usize) {
    FEED_CANDIDATES
        .with_label_values(&[mode])
        .observe(count as f64);
}

pub fn record_engagement(action: &str) {
    ENGAGEMENT_ACTIONS_TOTAL.with_label_values(&[action]).inc();
}

/// `GET /metrics` in Prometheus text format
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
