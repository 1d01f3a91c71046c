//! Feed configuration.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::errors::StreamError;

/// Prefix for every environment variable read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "BASESTREAM_";

fn default_grpc_url() -> String {
    String::from("http://tokyo.grpc.base.blockrazor.xyz:80")
}

fn default_websocket_url() -> String {
    String::from("ws://tokyo.base.blockrazor.xyz:81/ws")
}

fn default_block_connect_timeout_secs() -> u64 {
    30
}

fn default_flash_connect_timeout_secs() -> u64 {
    5
}

fn default_websocket_connect_timeout_secs() -> u64 {
    45
}

fn default_submit_timeout_secs() -> u64 {
    3
}

///
/// Endpoints, credential and timeouts for one client.
///
/// Pick the endpoints geographically closest to you, e.g.
/// `ws://frankfurt.base.blockrazor.xyz:81/ws` or `ws://virginia.base.blockrazor.xyz:81/ws`.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_grpc_url")]
    pub grpc_url: String,
    #[serde(default = "default_websocket_url")]
    pub websocket_url: String,
    pub auth_token: String,
    #[serde(default = "default_block_connect_timeout_secs")]
    pub block_connect_timeout_secs: u64,
    #[serde(default = "default_flash_connect_timeout_secs")]
    pub flash_connect_timeout_secs: u64,
    #[serde(default = "default_websocket_connect_timeout_secs")]
    pub websocket_connect_timeout_secs: u64,
    #[serde(default = "default_submit_timeout_secs")]
    pub submit_timeout_secs: u64,
}

impl Config {
    /// Create a config with the default endpoints and timeouts.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            grpc_url: default_grpc_url(),
            websocket_url: default_websocket_url(),
            auth_token: auth_token.into(),
            block_connect_timeout_secs: default_block_connect_timeout_secs(),
            flash_connect_timeout_secs: default_flash_connect_timeout_secs(),
            websocket_connect_timeout_secs: default_websocket_connect_timeout_secs(),
            submit_timeout_secs: default_submit_timeout_secs(),
        }
    }

    ///
    /// Load `BASESTREAM_*` variables, reading a `.env` first if there is one.
    ///
    pub fn from_env() -> Result<Self, StreamError> {
        dotenv::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|err| StreamError::Config(err.to_string()))?;
        config.validated()
    }

    /// Load the config from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|err| StreamError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_yaml(&contents)
    }

    /// Parse the config from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, StreamError> {
        let config: Config = serde_yaml::from_str(contents)
            .map_err(|err| StreamError::Config(err.to_string()))?;
        config.validated()
    }

    fn validated(self) -> Result<Self, StreamError> {
        if self.auth_token.trim().is_empty() {
            return Err(StreamError::Config("auth_token must not be empty".into()));
        }
        // Sent as a header and as gRPC metadata, both visible ASCII only
        if !self.auth_token.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(StreamError::Config(
                "auth_token must be printable ASCII".into(),
            ));
        }
        url::Url::parse(&self.grpc_url)
            .map_err(|err| StreamError::Config(format!("grpc_url: {}", err)))?;
        url::Url::parse(&self.websocket_url)
            .map_err(|err| StreamError::Config(format!("websocket_url: {}", err)))?;
        Ok(self)
    }

    pub fn block_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.block_connect_timeout_secs)
    }

    pub fn flash_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.flash_connect_timeout_secs)
    }

    pub fn websocket_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.websocket_connect_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn yaml_fills_in_defaults() {
        let config = Config::from_yaml("auth_token: secret\n").unwrap();

        assert_eq!(config, Config::new("secret"));
        assert_eq!(config.block_connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.flash_connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.websocket_connect_timeout(), Duration::from_secs(45));
        assert_eq!(config.submit_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn yaml_overrides_endpoints() {
        let config = Config::from_yaml(
            "auth_token: secret\n\
             websocket_url: ws://frankfurt.base.blockrazor.xyz:81/ws\n\
             submit_timeout_secs: 1\n",
        )
        .unwrap();

        assert_eq!(config.websocket_url, "ws://frankfurt.base.blockrazor.xyz:81/ws");
        assert_eq!(config.submit_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = Config::from_yaml("auth_token: \"  \"\n").unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn unprintable_token_is_rejected() {
        let err = Config::from_yaml("auth_token: \"bad\\ntoken\"\n").unwrap_err();
        assert!(err.to_string().contains("printable"), "{err}");
    }

    #[test]
    fn websocket_timeout_is_its_own() {
        let config =
            Config::from_yaml("auth_token: secret\nwebsocket_connect_timeout_secs: 10\n").unwrap();

        assert_eq!(config.websocket_connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.block_connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = Config::from_yaml("grpc_url: http://localhost:80\n").unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn bad_url_is_rejected() {
        let err = Config::from_yaml("auth_token: secret\nwebsocket_url: not a url\n").unwrap_err();
        assert!(err.to_string().contains("websocket_url"));
    }

    #[test]
    fn can_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "auth_token: from-file").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.auth_token, "from-file");
    }
}
