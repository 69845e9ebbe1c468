use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber; `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_env_filter(filter).with_target(false).init();
    set_panic_hook();
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let backtrace = Backtrace::capture();

        match info.location() {
            Some(location) => tracing::error!(
                panic = %message,
                location = %location,
                backtrace = %backtrace,
                "panic"
            ),
            None => tracing::error!(panic = %message, backtrace = %backtrace, "panic"),
        }
    }));
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
