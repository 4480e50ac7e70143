//! Telemetry & Observability
//!
//! Provides structured logging and tracing for studio operations.
//! Features:
//! - Generation spans with timing and outcome
//! - Orchestrator phase transition logging
//! - Configurable log levels via RUST_LOG
//! - Log sanitising and credential redaction

use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{error, info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sanitize a string for safe log output by escaping control characters.
/// Prevents log injection where user notes embed newlines to forge log entries.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Compiled regex patterns for secret redaction.
static SECRET_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn secret_patterns() -> &'static Vec<Regex> {
    SECRET_PATTERNS.get_or_init(|| {
        vec![
            // Credentials passed as query parameters
            Regex::new(r"(?i)\b(key|client_id|access_key|api_key)=[^&\s]+")
                .expect("invalid query secret regex"),
            // Authorization header values
            Regex::new(r"(?i)(Client-ID|Bearer)\s+[A-Za-z0-9_\-\.]{8,}")
                .expect("invalid auth header regex"),
            // Google API keys
            Regex::new(r"AIza[0-9A-Za-z_\-]{20,}").expect("invalid google key regex"),
        ]
    })
}

/// Redact credential patterns from a string before logging.
///
/// Matches `key=`/`client_id=` style query parameters, `Client-ID` and
/// `Bearer` header values and Google API keys, replacing them with
/// `[REDACTED]`.
pub fn redact_secrets(input: &str) -> String {
    let mut result = input.to_string();
    for pattern in secret_patterns() {
        result = pattern.replace_all(&result, "[REDACTED]").to_string();
    }
    result
}

/// Initialize global tracing subscriber with configurable output
/// By default, only enables tracing if RUST_LOG is explicitly set
pub fn init_tracing() {
    // Without RUST_LOG, stay silent so the studio screens are not interleaved
    // with log lines.
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize tracing for verbose mode
pub fn init_tracing_verbose() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "archvision=debug,info".to_string());
    init_tracing_with_filter(&filter)
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    // Skip if already initialized
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr); // Write to stderr, not stdout

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Run a generation future inside a span that records duration and outcome.
pub async fn track_generation<F, Fut, T, E>(kind: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let span = info_span!(
        "studio.generate",
        kind = kind,
        duration_ms = tracing::field::Empty,
        success = tracing::field::Empty,
    );

    // Not entered across the await; the fields are recorded after it.
    info!(parent: &span, "Starting generation");
    let result = f().await;
    let duration = start.elapsed().as_millis() as u64;
    span.record("duration_ms", duration);

    match &result {
        Ok(_) => {
            span.record("success", true);
            info!(parent: &span, duration_ms = duration, "Generation completed");
        }
        Err(e) => {
            let safe_err = redact_secrets(&sanitize_for_log(&e.to_string()));
            span.record("success", false);
            error!(
                parent: &span,
                duration_ms = duration,
                error = safe_err.as_str(),
                "Generation failed"
            );
        }
    }
    result
}

/// Record an orchestrator phase transition
pub fn record_state_transition(from: &str, to: &str) {
    let safe_from = sanitize_for_log(from);
    let safe_to = sanitize_for_log(to);
    info!(
        from = safe_from.as_str(),
        to = safe_to.as_str(),
        "Generation phase transition"
    );
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
