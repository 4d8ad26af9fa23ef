// src/config.rs

pub mod cookie;

use self::cookie::{load_or_create_external_config, resolve_cookie};
use crate::{cli::Cli, constants, error::AppResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub delay_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// `~/.ozon-cheque-dl/config.json` 的内容，所有字段均可省略。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            network: NetworkConfig {
                connect_timeout_secs: Some(10),
                timeout_secs: Some(60),
                delay_ms: Some(constants::DEFAULT_DELAY_MS),
                user_agent: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cookie: Option<String>,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// 两次请求之间的固定间隔
    pub delay: Duration,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        Ok(Self::merge(args, external_config))
    }

    fn merge(args: &Cli, external_config: ExternalConfig) -> Self {
        let (cookie, source) =
            resolve_cookie(args.cookie.as_deref(), external_config.cookie.as_deref());
        if cookie.is_some() {
            info!("从 {} 加载 Cookie", source);
        }
        let network = external_config.network;
        let delay_ms = args
            .delay_ms
            .or(network.delay_ms)
            .unwrap_or(constants::DEFAULT_DELAY_MS);

        Self {
            cookie,
            user_agent: network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(network.connect_timeout_secs.unwrap_or(10)),
            timeout: Duration::from_secs(network.timeout_secs.unwrap_or(60)),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            delay: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_delay_overrides_file() {
        let args = Cli::parse_from(["ozon-cheque-dl", "--stdin", "--delay-ms", "0", "--cookie", "a=b"]);
        let mut file = ExternalConfig::default();
        file.network.delay_ms = Some(5000);
        file.network.user_agent = Some("custom-agent".to_string());

        let config = AppConfig::merge(&args, file);
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.cookie.as_deref(), Some("a=b"));
        assert_eq!(config.user_agent, "custom-agent");
    }

    #[test]
    fn test_defaults_fill_missing_network_fields() {
        let args = Cli::parse_from(["ozon-cheque-dl", "--stdin", "--cookie", "a=b"]);
        let config = AppConfig::merge(&args, ExternalConfig { cookie: None, network: NetworkConfig::default() });
        assert_eq!(config.delay, Duration::from_millis(constants::DEFAULT_DELAY_MS));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, constants::USER_AGENT);
    }
}
