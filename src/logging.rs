//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the directives below apply; flow
//! transitions stay at debug everywhere so ignored submits and superseded
//! responses show up in production logs too.

use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for an environment.
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "agrismart_web=debug,tower_http=debug,reqwest=info,info",
        Environment::Staging => "agrismart_web=debug,tower_http=info,info",
        Environment::Prod => "agrismart_web=info,agrismart_web::flows=debug,tower_http=info,warn",
    }
}

pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    // Source locations only help locally.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    let registry = tracing_subscriber::registry().with(filter);
    if env.is_prod() {
        registry.with(fmt_layer.json().flatten_event(true)).init();
    } else {
        registry.with(fmt_layer.pretty()).init();
    }

    tracing::info!(env = ?env, "Logging initialized");
}
