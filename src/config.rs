use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PineconeConfig {
    pub api_key: String,
    pub environment: String,
    pub index_name: String,
    /// Explicit index endpoint. When unset the endpoint is derived from
    /// the index name and environment.
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub openai: OpenAiConfig,
    pub pinecone: PineconeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::VirtualTaError::Io)?;

        let mut config: AppConfig =
            toml::from_str(&content).map_err(crate::VirtualTaError::TomlParsing)?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::VirtualTaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Environment variables take precedence over file values for secrets
    /// and the listening port.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.openai.api_key = key;
        }
        if let Ok(key) = std::env::var("PINECONE_API_KEY") {
            self.pinecone.api_key = key;
        }
        if let Ok(env) = std::env::var("PINECONE_ENVIRONMENT") {
            self.pinecone.environment = env;
        }
        if let Ok(name) = std::env::var("PINECONE_INDEX_NAME") {
            self.pinecone.index_name = name;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Check that every required provider setting is present.
    ///
    /// # Errors
    /// - Returns a config error naming each missing setting
    pub fn validate(&self) -> crate::Result<()> {
        let mut missing = Vec::new();
        if self.openai.api_key.is_empty() {
            missing.push("openai.api_key (OPENAI_API_KEY)");
        }
        if self.pinecone.api_key.is_empty() {
            missing.push("pinecone.api_key (PINECONE_API_KEY)");
        }
        if self.pinecone.environment.is_empty() {
            missing.push("pinecone.environment (PINECONE_ENVIRONMENT)");
        }
        if self.pinecone.index_name.is_empty() {
            missing.push("pinecone.index_name (PINECONE_INDEX_NAME)");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::VirtualTaError::Config(format!(
                "Missing {}",
                missing.join(", ")
            )))
        }
    }

    /// Get the vector index query endpoint
    #[must_use]
    pub fn index_endpoint(&self) -> String {
        self.pinecone.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.svc.{}.pinecone.io",
                self.pinecone.index_name, self.pinecone.environment
            )
        })
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.openai.embedding_model
    }

    /// Get chat completion model name
    pub fn chat_model(&self) -> &str {
        &self.openai.chat_model
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            openai: OpenAiConfig {
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                embedding_model: default_embedding_model(),
                chat_model: default_chat_model(),
            },
            pinecone: PineconeConfig {
                api_key: String::new(),
                environment: String::new(),
                index_name: String::new(),
                endpoint: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn populated_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.openai.api_key = "sk-test".to_string();
        config.pinecone.api_key = "pc-test".to_string();
        config.pinecone.environment = "us-east1-gcp".to_string();
        config.pinecone.index_name = "course-materials".to_string();
        config
    }

    #[test]
    fn test_default_port_is_3000() {
        assert_eq!(AppConfig::default().server.port, 3000);
    }

    #[test]
    fn test_validate_reports_missing_keys() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("openai.api_key"));
        assert!(message.contains("pinecone.index_name"));
    }

    #[test]
    fn test_validate_accepts_populated_config() {
        assert!(populated_config().validate().is_ok());
    }

    #[test]
    fn test_index_endpoint_derived_from_environment() {
        let config = populated_config();
        assert_eq!(
            config.index_endpoint(),
            "https://course-materials.svc.us-east1-gcp.pinecone.io"
        );
    }

    #[test]
    fn test_index_endpoint_override_wins() {
        let mut config = populated_config();
        config.pinecone.endpoint = Some("http://localhost:8100".to_string());
        assert_eq!(config.index_endpoint(), "http://localhost:8100");
    }

    #[test]
    fn test_from_file_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[logging]
level = "debug"
backtrace = false

[openai]
api_key = "sk-file"

[pinecone]
api_key = "pc-file"
environment = "us-east1-gcp"
index_name = "course-materials"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.openai.embedding_model, "text-embedding-ada-002");
        assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
    }
}
