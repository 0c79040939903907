use mailer_engine::{EngineConfig, SubmitSettings};

const ENDPOINT_VAR: &str = "MAILER_ENDPOINT";

/// Engine configuration for the app: defaults, with the endpoint overridable for local stubs.
pub fn engine_config() -> EngineConfig {
    engine_config_with(std::env::var(ENDPOINT_VAR).ok())
}

fn engine_config_with(endpoint: Option<String>) -> EngineConfig {
    let mut config = EngineConfig::default();
    if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
        config.submit = SubmitSettings {
            endpoint: endpoint.trim().to_string(),
            ..config.submit
        };
    }
    config
}
