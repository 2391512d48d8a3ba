use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    pub static ref QUESTIONS_GENERATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_generated_total",
        "Total number of generated questions",
        &["domain", "kind"]
    )
    .unwrap();

    pub static ref ANSWERS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_answers_submitted_total",
        "Total number of answers submitted",
        &["domain", "correct"]
    )
    .unwrap();

    pub static ref LEVEL_UPS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_level_ups_total",
        "Total number of level-ups",
        &["domain"]
    )
    .unwrap();

    pub static ref SESSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_sessions_total",
        "Total number of quiz sessions",
        &["status"]
    )
    .unwrap();

    pub static ref SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "quiz_sessions_active",
        "Number of currently open quiz sessions"
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_metrics() {
        QUESTIONS_GENERATED_TOTAL
            .with_label_values(&["math", "counting"])
            .inc();

        let output = render_metrics().unwrap();
        assert!(output.contains("quiz_questions_generated_total"));
    }
}
