//! Structured log events for session and credential operations.
//!
//! Each function emits a `tracing` event with structured fields. Token values
//! are never passed in; only identities, paths and statuses.

/// Log a successful login exchange.
pub fn logged_in(username: &str) {
    tracing::info!(event = "logged_in", username = %username, "login exchange succeeded");
}

/// Log a rejected login exchange.
pub fn login_rejected(username: &str, status: u16) {
    tracing::warn!(
        event = "login_rejected",
        username = %username,
        status = status,
        "login exchange rejected"
    );
}

/// Log a session that settled as authenticated.
pub fn session_hydrated(member_id: i64, official: bool) {
    tracing::info!(
        event = "session_hydrated",
        member_id = member_id,
        official = official,
        "session hydrated"
    );
}

/// Log a session that settled as anonymous.
pub fn session_anonymous(reason: &str) {
    tracing::info!(event = "session_anonymous", reason = %reason, "session is anonymous");
}

/// Log a successful access token renewal.
pub fn token_refreshed(rotated: bool) {
    tracing::info!(event = "token_refreshed", rotated = rotated, "access token renewed");
}

/// Log a refresh exchange the server refused. Stored credentials are dropped.
pub fn refresh_rejected(status: u16) {
    tracing::warn!(
        event = "refresh_rejected",
        status = status,
        "refresh token rejected, credentials cleared"
    );
}

/// Log a 401 seen by the request layer.
pub fn request_unauthorized(path: &str, retried: bool) {
    tracing::warn!(
        event = "request_unauthorized",
        path = %path,
        retried = retried,
        "request unauthorized"
    );
}

/// Log an explicit logout.
pub fn logged_out() {
    tracing::info!(event = "logged_out", "credentials cleared by logout");
}
