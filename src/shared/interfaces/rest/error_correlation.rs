use uuid::Uuid;

/// Logs `detail` under a fresh correlation id and returns the id.
///
/// Only the id is meant to reach clients; the detail stays in the log.
pub fn record_internal_error(context: &str, detail: &str) -> String {
    let error_id = Uuid::new_v4().to_string();
    tracing::error!(error_id = %error_id, context, detail, "internal error");
    error_id
}
