//! Settings resolution for civitas-hub
//!
//! **Priority:** command line → environment → TOML config → compiled default.
//! Command line and environment are handled together by clap's `env` support.

use clap::Parser;
use civitas_common::config::{resolve_root_folder, TomlConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5780;

/// Default timeout for calls to the external assist API
pub const DEFAULT_ASSIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Command-line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "civitas-hub", version, about = "Civitas disaster-response coordination hub")]
pub struct CliArgs {
    /// Root folder holding the database
    #[arg(long, env = "CIVITAS_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config location)
    #[arg(long, env = "CIVITAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "CIVITAS_BIND")]
    pub bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(long, env = "CIVITAS_PORT")]
    pub port: Option<u16>,

    /// Base URL of an external assist API; local fallback only when unset
    #[arg(long, env = "CIVITAS_ASSIST_URL")]
    pub assist_url: Option<String>,
}

/// Fully resolved hub settings
#[derive(Debug, Clone, PartialEq)]
pub struct HubSettings {
    pub root_folder: PathBuf,
    pub listen_addr: SocketAddr,
    pub assist_api_url: Option<String>,
    pub assist_timeout: Duration,
}

impl HubSettings {
    /// Merge CLI/ENV arguments over the TOML config
    ///
    /// An unparsable `hub.bind_address` in TOML is ignored with a warning.
    pub fn resolve(args: &CliArgs, toml: &TomlConfig) -> Self {
        let root_folder = resolve_root_folder(args.root_folder.as_deref(), toml);

        let toml_bind = toml.hub.bind_address.as_deref().and_then(|addr| {
            addr.parse::<IpAddr>()
                .map_err(|e| tracing::warn!("Ignoring invalid hub.bind_address {:?}: {}", addr, e))
                .ok()
        });
        let ip = args
            .bind
            .or(toml_bind)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = args.port.or(toml.hub.port).unwrap_or(DEFAULT_PORT);

        let assist_api_url = args
            .assist_url
            .clone()
            .or_else(|| toml.assist_api_url.clone())
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let assist_timeout = toml
            .assist_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ASSIST_TIMEOUT);

        Self {
            root_folder,
            listen_addr: SocketAddr::new(ip, port),
            assist_api_url,
            assist_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civitas_common::config::HubConfig;

    fn toml_with_hub(bind: Option<&str>, port: Option<u16>) -> TomlConfig {
        TomlConfig {
            root_folder: Some(PathBuf::from("/tmp/civitas-hub-test")),
            hub: HubConfig {
                bind_address: bind.map(str::to_string),
                port,
            },
            ..TomlConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = HubSettings::resolve(&CliArgs::default(), &toml_with_hub(None, None));
        assert_eq!(settings.listen_addr, "127.0.0.1:5780".parse().unwrap());
        assert_eq!(settings.assist_api_url, None);
        assert_eq!(settings.assist_timeout, DEFAULT_ASSIST_TIMEOUT);
    }

    #[test]
    fn test_toml_values_used_without_cli() {
        let settings =
            HubSettings::resolve(&CliArgs::default(), &toml_with_hub(Some("0.0.0.0"), Some(9000)));
        assert_eq!(settings.listen_addr, "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn test_cli_overrides_toml() {
        let args = CliArgs {
            port: Some(7000),
            assist_url: Some("http://assist.example/api/ai/".to_string()),
            ..CliArgs::default()
        };
        let mut toml = toml_with_hub(Some("0.0.0.0"), Some(9000));
        toml.assist_api_url = Some("http://other".to_string());

        let settings = HubSettings::resolve(&args, &toml);
        assert_eq!(settings.listen_addr, "0.0.0.0:7000".parse().unwrap());
        assert_eq!(settings.assist_api_url.as_deref(), Some("http://assist.example/api/ai"));
    }

    #[test]
    fn test_invalid_toml_bind_is_ignored() {
        let settings =
            HubSettings::resolve(&CliArgs::default(), &toml_with_hub(Some("not-an-ip"), None));
        assert_eq!(settings.listen_addr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_blank_assist_url_means_fallback_only() {
        let args = CliArgs {
            assist_url: Some("   ".to_string()),
            ..CliArgs::default()
        };
        let settings = HubSettings::resolve(&args, &toml_with_hub(None, None));
        assert_eq!(settings.assist_api_url, None);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "civitas-hub",
            "--port",
            "6001",
            "--bind",
            "10.0.0.5",
        ])
        .unwrap();
        assert_eq!(args.port, Some(6001));
        assert_eq!(args.bind, Some("10.0.0.5".parse().unwrap()));
    }
}
