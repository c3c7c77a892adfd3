use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `kubegraph=debug` unless `RUST_LOG` is set
    Development,
    /// JSON lines, `kubegraph=info` unless `RUST_LOG` is set
    Production,
    /// Bare registry; tests install their own layer via `init_test_capture`
    Test,
}

impl Profile {
    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "kubegraph=debug",
            Profile::Production | Profile::Test => "kubegraph=info",
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has an effect. Logs go to stderr so that manifest
/// text written to stdout stays clean.
///
/// # Example
///
/// ```
/// use kubegraph_core::logging_facility::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            // try_init: a capture layer may already be installed
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
