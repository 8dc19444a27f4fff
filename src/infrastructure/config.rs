use crate::domain::errors::CarError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Address of the remote car API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "localhost".to_string(),
            port: 3000,
        }
    }
}

impl ApiConfig {
    /// `http://host:port`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
}

fn default_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("carctl").join("carctl.toml");
    path.is_file().then_some(path)
}

impl Config {
    /// Merges defaults, a TOML file and `CARCTL_*` environment variables.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, CarError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        let file = match path {
            Some(path) if !path.is_file() => {
                return Err(CarError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_path(),
        };
        if let Some(file) = file {
            debug!("Loading configuration from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }

        let config: Self = figment
            .merge(Env::prefixed("CARCTL_").split("_"))
            .extract()?;
        debug!("Using API at {}", config.api.base_url());
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded settings
    pub fn with_overrides(mut self, host: Option<&str>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.api.host = host.to_string();
        }
        if let Some(port) = port {
            self.api.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api.host, "localhost");
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.base_url(), "http://localhost:3000");
    }

    #[test]
    fn file_then_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "carctl.toml",
                r#"
                [api]
                host = "cars.internal"
                port = 8080
                "#,
            )?;

            let config = Config::load(Some(Path::new("carctl.toml"))).expect("load");
            assert_eq!(config.api.host, "cars.internal");
            assert_eq!(config.api.port, 8080);

            jail.set_env("CARCTL_API_PORT", "9090");
            let config = Config::load(Some(Path::new("carctl.toml"))).expect("load");
            assert_eq!(config.api.host, "cars.internal");
            assert_eq!(config.api.port, 9090);

            let config = config.with_overrides(Some("127.0.0.1"), None);
            assert_eq!(config.api.base_url(), "http://127.0.0.1:9090");
            Ok(())
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert!(matches!(err, CarError::ConfigNotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn bad_port_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("carctl.toml", "[api]\nport = \"eighty\"\n")?;
            let err = Config::load(Some(Path::new("carctl.toml"))).unwrap_err();
            assert!(matches!(err, CarError::Config(_)));
            assert_eq!(err.exit_code(), 78);
            Ok(())
        });
    }
}
