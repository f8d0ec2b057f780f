//! Process-wide Prometheus counters.
//!
//! Registered lazily in the default registry; `/metrics` renders them with
//! [`encode_metrics`].
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

pub static ARTICLE_VIEWS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "blog_article_views_total",
        "Article views recorded in the hit log"
    )
    .expect("register article_views_total")
});

pub static ARTICLES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "blog_articles_created_total",
        "Articles stored"
    )
    .expect("register articles_created_total")
});

pub static NOTIFICATIONS_ENQUEUED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "blog_notifications_enqueued_total",
        "New-article notifications handed to the queue"
    )
    .expect("register notifications_enqueued_total")
});

pub static NOTIFICATIONS_FAILED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "blog_notifications_failed_total",
        "New-article notifications that could not be enqueued or delivered"
    )
    .expect("register notifications_failed_total")
});

/// Render the default registry in the text exposition format.
pub fn encode_metrics() -> Result<String, String> {
    // Touch the counters so they show up before the first increment.
    Lazy::force(&ARTICLE_VIEWS_TOTAL);
    Lazy::force(&ARTICLES_CREATED_TOTAL);
    Lazy::force(&NOTIFICATIONS_ENQUEUED_TOTAL);
    Lazy::force(&NOTIFICATIONS_FAILED_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_output_lists_blog_counters() {
        ARTICLES_CREATED_TOTAL.inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("blog_articles_created_total"));
        assert!(text.contains("blog_article_views_total"));
    }
}
