use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    pub api_keys: Option<ApiKeysConfig>,
    pub cors: Option<CorsConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssistantConfig {
    pub model: String,
    pub max_steps: u32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiKeysConfig {
    pub mistral_api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: samaki_assistant::mistral::MISTRAL_LARGE_ID.to_string(),
            max_steps: samaki_assistant::DEFAULT_MAX_STEPS,
            max_tokens: 1024,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            assistant: AssistantConfig::default(),
            api_keys: None,
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
        }
    }
}

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            let default_config = r#"
[server]
host = "127.0.0.1"
port = 8080

[assistant]
model = "mistral-large-latest"
max_steps = 3
max_tokens = 1024

[cors]
allowed_origins = ["http://localhost:3000"]

[api_keys]
# mistral_api_key = "your-mistral-key"
# The MISTRAL_API_KEY environment variable takes precedence over this file.
"#;
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    /// Model-provider credential: environment first, then the config file.
    /// Never a hardcoded fallback.
    pub fn mistral_api_key(&self) -> Option<String> {
        std::env::var("MISTRAL_API_KEY").ok().or_else(|| {
            self.api_keys
                .as_ref()
                .and_then(|keys| keys.mistral_api_key.clone())
        })
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors
            .as_ref()
            .map(|cors| cors.allowed_origins.clone())
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()])
    }
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("samaki/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
