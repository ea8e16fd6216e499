//! Configuration for locating the command server.
//!
//! The server base URL stands in for a web page's own origin: the catalog and
//! execution endpoints are both derived from it.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Default path for the panel configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.cmdpanel/config.yml";

/// Server used when neither the command line nor the config file names one
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelConfig {
    pub server: Option<String>,
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use cmdpanel_core::config::get_config_path;
///
/// let default_path = get_config_path(&None);
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Reads the panel configuration.
///
/// A missing file yields the default configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid YAML.
pub fn load_config(config_path: &str) -> Result<PanelConfig> {
    if !Path::exists(Path::new(config_path)) {
        return Ok(PanelConfig::default());
    }

    let contents = fs::read_to_string(config_path)
        .map_err(|e| Error::io_error("config".to_string(), config_path.to_string(), e))?;

    if contents.trim().is_empty() {
        return Ok(PanelConfig::default());
    }

    serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })
}

/// Picks the server URL: command line first, then config file, then default.
///
/// # Errors
///
/// Returns [`Error::InvalidServerUrl`] for unparsable input and
/// [`Error::UnsupportedScheme`] for anything but `http`/`https`.
pub fn resolve_server_url(server_arg: Option<&str>, config: &PanelConfig) -> Result<Url> {
    let server = server_arg
        .or(config.server.as_deref())
        .unwrap_or(DEFAULT_SERVER_URL);

    let url = Url::parse(server).map_err(|e| Error::InvalidServerUrl(server.to_string(), e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.yml".to_string());
        assert_eq!(get_config_path(&custom_path), "/custom/path/config.yml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        assert!(result.ends_with("config.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_load_config_missing_file() {
        let config = load_config("/this/path/does/not/exist.yml").unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_load_config_with_server() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "server: \"https://panel.example.com:9443\"").unwrap();

        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config.server,
            Some("https://panel.example.com:9443".to_string())
        );
    }

    #[test]
    fn test_load_config_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = load_config(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "server: [").unwrap();

        let result = load_config(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_resolve_server_url_precedence() {
        let config = PanelConfig {
            server: Some("http://from-config:1234".to_string()),
        };

        let url = resolve_server_url(Some("https://from-arg"), &config).unwrap();
        assert_eq!(url.host_str(), Some("from-arg"));

        let url = resolve_server_url(None, &config).unwrap();
        assert_eq!(url.host_str(), Some("from-config"));
        assert_eq!(url.port(), Some(1234));

        let url = resolve_server_url(None, &PanelConfig::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_resolve_server_url_rejects_bad_input() {
        let config = PanelConfig::default();
        assert!(matches!(
            resolve_server_url(Some("not a url"), &config),
            Err(Error::InvalidServerUrl(_, _))
        ));
        assert!(matches!(
            resolve_server_url(Some("ftp://files.example.com"), &config),
            Err(Error::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }
}
