use crate::error::{Result, SoilCheckError};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    10000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".into()]
}

fn default_body_limit() -> usize {
    1024 * 1024
}

/// Accepts either a YAML number or a string, since `${PORT}` substitution
/// produces a string when quoted.
fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(value) => value.parse::<u16>().map_err(|_| {
            D::Error::custom(format!(
                "invalid port '{}' - ensure PORT environment variable is set",
                value
            ))
        }),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

const PLACEHOLDER_SECRET: &str = "change-me-in-production";

fn default_token_ttl_days() -> i64 {
    7
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: PLACEHOLDER_SECRET.into(),
            token_ttl_days: default_token_ttl_days(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// True when tokens would be signed with a guessable secret. An unset
    /// `${VAR}` reference is left verbatim by substitution and counts too.
    pub fn has_placeholder_secret(&self) -> bool {
        let secret = self.jwt_secret.trim();
        secret.is_empty() || secret == PLACEHOLDER_SECRET || secret.contains("${")
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_days", &self.token_ttl_days)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    /// Load config from the override path or the standard locations.
    /// Falls back to defaults when no file exists. Environment overrides are
    /// applied last.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(SoilCheckError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                Some(p.clone())
            }
            None => Self::find_config_path(),
        };

        let mut config = match config_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading configuration");
                let config_str = std::fs::read_to_string(&path)
                    .map_err(|e| SoilCheckError::Config(format!("Failed to read config: {}", e)))?;
                Self::parse(&config_str)?
            }
            None => {
                tracing::info!("No config file found, using defaults");
                Config::default()
            }
        };

        config.apply_env_overrides()?;
        if config.auth.has_placeholder_secret() {
            tracing::warn!(
                "No token signing secret configured; set SOILCHECK_JWT_SECRET before exposing the API"
            );
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| SoilCheckError::Config(format!("Failed to parse config: {}", e)))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                SoilCheckError::Config(format!("invalid PORT environment variable '{}'", port))
            })?;
        }

        if let Ok(secret) = std::env::var("SOILCHECK_JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }

        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("soilcheck").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/soilcheck/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SoilCheckError::Config("Cannot determine config directory".into()))?
            .join("soilcheck");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up SoilCheck!");
        println!();

        println!("HTTP Server");
        let host: String = Input::new()
            .with_prompt("  Bind host")
            .default(default_host())
            .interact_text()
            .map_err(|e| SoilCheckError::Config(format!("Input error: {}", e)))?;

        let port: u16 = Input::new()
            .with_prompt("  Port")
            .default(default_port())
            .interact_text()
            .map_err(|e| SoilCheckError::Config(format!("Input error: {}", e)))?;

        let origins: String = Input::new()
            .with_prompt("  Allowed CORS origins (comma separated)")
            .default(default_cors_origins().join(","))
            .interact_text()
            .map_err(|e| SoilCheckError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Authentication");
        let jwt_secret: String = Password::new()
            .with_prompt("  Token signing secret")
            .interact()
            .map_err(|e| SoilCheckError::Config(format!("Input error: {}", e)))?;

        let token_ttl_days: i64 = Input::new()
            .with_prompt("  Token lifetime (days)")
            .default(default_token_ttl_days())
            .interact_text()
            .map_err(|e| SoilCheckError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            server: ServerConfig {
                host,
                port,
                cors_origins: origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
                body_limit_bytes: default_body_limit(),
            },
            auth: AuthConfig {
                jwt_secret,
                token_ttl_days,
                bcrypt_cost: default_bcrypt_cost(),
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SoilCheckError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SoilCheck Configuration\n# Generated by `soilcheck init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("SOILCHECK_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SoilCheckError::Config("Cannot determine data directory".into()))?
            .join("soilcheck");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("soilcheck.db"))
    }
}
