use cjk_core::config::ObservabilityConfig;
use cjk_observability::{events, init_from_config, init_tracing, init_tracing_with_filter};

#[test]
fn test_events_are_safe_without_subscriber() {
    events::logged_in("awa");
    events::login_rejected("awa", 401);
    events::session_hydrated(7, true);
    events::session_anonymous("no credentials");
    events::token_refreshed(false);
    events::refresh_rejected(401);
    events::request_unauthorized("/api/members/me/", true);
    events::logged_out();
}

#[test]
fn test_repeated_initialization_does_not_panic() {
    init_tracing_with_filter("debug");
    init_tracing();
    init_from_config(&ObservabilityConfig {
        log_level: "warn".into(),
        json: true,
    });
    events::token_refreshed(true);
}
