use std::sync::Arc;
use std::sync::Once;

use config::Environment;
use contentcraft_auth::AuthConfig;
use contentcraft_auth::Authenticator;

static TRACING: Once = Once::new();

/// Test harness holding an authenticator built from an isolated configuration
pub struct TestAuth {
    pub config: AuthConfig,
    pub authenticator: Arc<Authenticator>,
}

impl TestAuth {
    /// Build an authenticator signing with `secret`, without touching the
    /// process environment
    pub fn with_secret(secret: &str) -> Self {
        Self::with_vars(&[("SECRET_KEY", secret)])
    }

    pub fn with_vars(vars: &[(&str, &str)]) -> Self {
        init_tracing();

        let source: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let config = AuthConfig::load_from(Environment::default().source(Some(source)))
            .expect("Failed to load test configuration");
        let authenticator = Arc::new(Authenticator::new(&config));

        Self {
            config,
            authenticator,
        }
    }
}

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "contentcraft_auth=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
