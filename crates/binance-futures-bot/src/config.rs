/*
[INPUT]:  Built-in defaults, optional YAML file, BINANCE_BOT_* environment, CLI flags
[OUTPUT]: Parsed bot configuration, client config and credentials
[POS]:    Configuration layer - process startup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use binance_futures_adapter::http::client::TESTNET_BASE_URL;
use binance_futures_adapter::{ClientConfig, Credentials};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::cli::Cli;

/// Prefix for environment overrides, e.g. `BINANCE_BOT_BASE_URL`
pub const ENV_PREFIX: &str = "BINANCE_BOT";

/// Top-level configuration for the order bot
#[derive(Debug, Deserialize)]
pub struct BotConfig {
    /// REST base URL
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_secret: Option<SecretString>,
    /// `recvWindow` in milliseconds; 0 leaves it out of the request
    pub recv_window: u64,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Sign with exchange time from /fapi/v1/time
    pub sync_server_time: bool,
    /// Console log filter (file log always records debug)
    pub log_level: String,
    pub log_file: PathBuf,
}

impl BotConfig {
    /// Load defaults, then the optional YAML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::finish(builder).with_context(|| match path {
            Some(path) => format!("load config from {}", path.display()),
            None => "load config".to_string(),
        })
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("base_url", TESTNET_BASE_URL)?
            .set_default("recv_window", 5000)?
            .set_default("timeout_secs", 10)?
            .set_default("connect_timeout_secs", 5)?
            .set_default("sync_server_time", true)?
            .set_default("log_level", "info")?
            .set_default("log_file", "bot.log")?;
        Ok(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        if config.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }
        if config.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be greater than 0");
        }
        Ok(config)
    }

    /// CLI flags win over file and environment
    pub fn apply_cli(&mut self, args: &Cli) {
        if let Some(api_key) = &args.api_key {
            self.api_key = Some(api_key.clone());
        }
        if let Some(api_secret) = &args.api_secret {
            self.api_secret = Some(SecretString::from(api_secret.clone()));
        }
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(log_level) = &args.log_level {
            self.log_level = log_level.clone();
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = log_file.clone();
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            recv_window: (self.recv_window > 0).then_some(self.recv_window),
            sync_server_time: self.sync_server_time,
        }
    }

    /// Take the credential pair out of the config for the client.
    pub fn take_credentials(&mut self) -> Result<Credentials> {
        let api_key = self.api_key.take().filter(|key| !key.trim().is_empty());
        let api_secret = self
            .api_secret
            .take()
            .filter(|secret| !secret.expose_secret().trim().is_empty());
        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Ok(Credentials { api_key, api_secret }),
            _ => bail!(
                "API credentials required via --api-key/--api-secret, \
                 BINANCE_API_KEY/BINANCE_API_SECRET or the config file"
            ),
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(SecretString::from))
}
