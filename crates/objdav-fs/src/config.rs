use crate::error::{Error, Result};
use objdav_log::Sink;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Gateway configuration, loadable from TOML.
///
/// ```toml
/// root = "/srv/share"
/// port = 4918
/// log_prefix = "gateway"
/// log_sink = "/var/log/objdav.log"
/// hide_dotfiles = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Local directory exposed as the WebDAV root.
    pub root: PathBuf,
    /// Port to listen on (0 for auto-assign).
    pub port: u16,
    /// Prefix of the root gateway logger.
    pub log_prefix: String,
    /// `stdout`, `stderr`, or a file path to append to.
    pub log_sink: String,
    /// Whether entries starting with `.` are left out of listings.
    pub hide_dotfiles: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            port: 4918,
            log_prefix: "gateway".to_string(),
            log_sink: "stderr".to_string(),
            hide_dotfiles: true,
        }
    }
}

impl BridgeConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Open the configured log sink.
    pub fn open_sink(&self) -> Result<Sink> {
        match self.log_sink.as_str() {
            "stdout" => Ok(Sink::stdout()),
            "stderr" => Ok(Sink::stderr()),
            path => Ok(Sink::append_file(path)?),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.log_sink.trim().is_empty() {
            return Err(Error::Config("log_sink must not be empty".to_string()));
        }
        if self.root.as_os_str().is_empty() {
            return Err(Error::Config("root must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.port, 4918);
        assert_eq!(config.log_prefix, "gateway");
        assert_eq!(config.log_sink, "stderr");
        assert!(config.hide_dotfiles);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BridgeConfig::from_toml_str("port = 8080\nroot = \"/srv/share\"\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.root, PathBuf::from("/srv/share"));
        assert_eq!(config.log_prefix, "gateway");
    }

    #[test]
    fn test_invalid_toml() {
        let err = BridgeConfig::from_toml_str("port = \"many\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_empty_sink_rejected() {
        let err = BridgeConfig::from_toml_str("log_sink = \"\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_file_sink_is_opened_for_append() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("gateway.log");
        let config = BridgeConfig {
            log_sink: path.to_string_lossy().into_owned(),
            ..Default::default()
        };

        config.open_sink().unwrap().write_entry("hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
