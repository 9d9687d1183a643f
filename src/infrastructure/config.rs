use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Static credential callers must present in `x-api-key` to use the relay.
/// Distinct from the upstream bearer token, which callers supply per request.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProxyConfig {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            graphql_url: default_graphql_url(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("RELAY").separator("__"));
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;

        // Deployments predating the prefixed scheme export the bare variable.
        // An absent key is not a startup error: the service runs and answers
        // 401 to every request until a key is provisioned.
        if config.proxy.api_key.trim().is_empty() {
            if let Ok(key) = env::var("PROXY_API_KEY") {
                config.proxy.api_key = key;
            }
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_graphql_url() -> String {
    "https://api.monarch.com/graphql".to_string()
}
