//! Tracing setup.
//!
//! LOG_LEVEL takes full env-filter directives ("debug", "info,game=trace",
//! ...); the default keeps the game engine chatty and the HTTP layers
//! quiet. LOG_FORMAT switches between the human "pretty" output (default)
//! and "json" for log shippers.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str =
    "info,game=debug,mathdrill_backend=debug,tower_http=warn,axum=warn";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // json() changes the builder type, so branch at init time.
    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        builder.json().init();
    } else {
        // file/line are only worth the width when a human is reading
        builder.with_file(true).with_line_number(true).init();
    }
}
