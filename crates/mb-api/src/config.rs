use serde::Deserialize;

/// Minimum length of the HS256 signing secret, in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Bounds accepted by bcrypt for the work factor
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Deployment environment, read from `ENV`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration from the environment: {0}")]
    Env(#[from] envy::Error),
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("JWT_SECRET must be at least 32 bytes long")]
    WeakJwtSecret,
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,
    #[serde(default)]
    pub env: Environment,
    /// Comma separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
}

fn default_jwt_expiry_hours() -> i64 {
    24
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_db_max_connections() -> u32 {
    10
}

impl ApiConfig {
    /// Load the configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::from_env()?;
        config.validate()
    }

    /// Load the configuration from Shuttle secrets, using the same keys as [`ApiConfig::from_env`].
    #[cfg(feature = "shuttle")]
    pub fn from_shuttle_secrets(
        secrets: &shuttle_runtime::SecretStore,
    ) -> Result<Self, ConfigError> {
        fn parsed<T: std::str::FromStr>(
            secrets: &shuttle_runtime::SecretStore,
            key: &'static str,
            default: T,
        ) -> Result<T, ConfigError> {
            match secrets.get(key) {
                Some(value) => value
                    .parse()
                    .map_err(|_| ConfigError::Invalid { key, value }),
                None => Ok(default),
            }
        }

        let env = match secrets.get("ENV").as_deref() {
            Some("production") => Environment::Production,
            Some("development") | None => Environment::Development,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "ENV",
                    value: other.to_string(),
                });
            }
        };

        let config = Self {
            // Shuttle injects the pool directly; the URL is only informational there
            database_url: secrets.get("DATABASE_URL").unwrap_or_default(),
            jwt_secret: secrets
                .get("JWT_SECRET")
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiry_hours: parsed(secrets, "JWT_EXPIRY_HOURS", default_jwt_expiry_hours())?,
            env,
            allowed_origins: secrets
                .get("ALLOWED_ORIGINS")
                .unwrap_or_else(default_allowed_origins),
            host: default_host(),
            port: default_port(),
            bcrypt_cost: parsed(secrets, "BCRYPT_COST", default_bcrypt_cost())?,
            db_max_connections: default_db_max_connections(),
        };
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakJwtSecret);
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.jwt_expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_HOURS",
                value: self.jwt_expiry_hours.to_string(),
            });
        }
        Ok(self)
    }

    /// Allowed CORS origins, trimmed and with empty entries dropped
    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut vars = vec![
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/mern_buddy".to_string(),
            ),
            (
                "JWT_SECRET".to_string(),
                "test_jwt_secret_minimum_32_characters_long".to_string(),
            ),
        ];
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        vars
    }

    fn load(extra: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let config: ApiConfig = envy::from_iter(vars(extra))?;
        config.validate()
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&[]).expect("config should load");

        assert_eq!(config.jwt_expiry_hours, 24);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.port, 5000);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["http://localhost:5173".to_string()]
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ENV", "production"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "https://a.dev, https://b.dev,,"),
        ])
        .expect("config should load");

        assert!(config.env.is_production());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["https://a.dev".to_string(), "https://b.dev".to_string()]
        );
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let config: ApiConfig = envy::from_iter(vec![
            ("DATABASE_URL".to_string(), "postgres://x".to_string()),
            ("JWT_SECRET".to_string(), "short".to_string()),
        ])
        .unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::WeakJwtSecret)));
    }

    #[test]
    fn test_missing_database_url() {
        let result: Result<ApiConfig, _> = envy::from_iter(vec![(
            "JWT_SECRET".to_string(),
            "test_jwt_secret_minimum_32_characters_long".to_string(),
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_bcrypt_cost() {
        let result = load(&[("BCRYPT_COST", "2")]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                ..
            })
        ));
    }
}
